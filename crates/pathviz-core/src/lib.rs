//! **pathviz-core** — grid model shared by the pathviz search and maze crates.
//!
//! This crate provides geometry primitives, the per-cell classification a
//! presentation layer renders ([`CellState`]), the dense obstacle [`Grid`],
//! and the session defaults in [`GridConfig`].

pub mod config;
pub mod geom;
pub mod grid;

pub use config::{ConfigError, GridConfig, MIN_DIM};
pub use geom::{Point, Range};
pub use grid::{CellState, Grid, GridParseError};

//! Perfect maze generation for pathviz grids.
//!
//! A maze is grown as a random spanning tree over a half-resolution logical
//! grid ([`Maze`]) and then expressed into a full-resolution obstacle
//! [`Grid`](pathviz_core::Grid) of size `(2·width+1) × (2·height+1)`.

pub mod maze;
pub mod mazegen;

pub use maze::Maze;
pub use mazegen::{MazeError, MazeGen, logical_cell};

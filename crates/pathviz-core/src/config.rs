//! Session defaults for a visualisation grid.

use thiserror::Error;

use crate::geom::Point;
use crate::grid::Grid;

/// Smallest row or column count a session grid may have. Below it the
/// default endpoints collide or leave the grid.
pub const MIN_DIM: i32 = 5;

/// Errors reported for an unusable [`GridConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Rows or columns below [`MIN_DIM`].
    #[error(
        "grid of {rows}x{cols} is too small, both sides must be at least {min}",
        min = MIN_DIM
    )]
    TooSmall { rows: i32, cols: i32 },
}

/// Size of the working grid and where the endpoints start out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub cols: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 41, cols: 41 }
    }
}

impl GridConfig {
    /// Create a config for a `rows × cols` grid.
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Check that the default endpoints fit the grid as two distinct
    /// cells, in both the configured and the maze-adjusted size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_DIM || self.cols < MIN_DIM {
            return Err(ConfigError::TooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Default robot position: second-to-last row, second column.
    pub fn start(&self) -> Point {
        Point::from_row_col(self.rows - 2, 1)
    }

    /// Default target position: second row, second-to-last column.
    pub fn target(&self) -> Point {
        Point::from_row_col(1, self.cols - 2)
    }

    /// Full-resolution `(rows, cols)` used when a maze is drawn.
    ///
    /// Mazes need odd dimensions so that walls land on even indices; even
    /// values are decremented.
    pub fn maze_dimensions(&self) -> (i32, i32) {
        let odd = |n: i32| if n % 2 == 0 { n - 1 } else { n };
        (odd(self.rows), odd(self.cols))
    }

    /// A fresh grid of this size with the default endpoints placed.
    pub fn empty_grid(&self) -> Result<Grid, ConfigError> {
        self.validate()?;
        let mut grid = Grid::new(self.cols, self.rows);
        grid.place_endpoints(self.start(), self.target());
        Ok(grid)
    }
}

//! Randomised spanning-tree maze generation.
//!
//! The generator is a depth-first growth with backtracking: the most recently
//! added cell is usually continued, but one time in ten a random cell from
//! the work list is picked instead. That breaks up long corridors into
//! shorter branches, which makes mazes harder to read at a glance.

use log::debug;
use pathviz_core::{ConfigError, Grid, GridConfig, Point};
use rand::Rng;
use thiserror::Error;

use crate::maze::Maze;

/// One pick in this many takes a random work-list entry instead of the last.
const BRANCH_ODDS: u32 = 10;

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Logical width and height must both be positive.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidGridDimensions { width: i32, height: i32 },
    /// The session config cannot hold a maze with both endpoints.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Maze generator drawing all of its randomness from `rng`.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Grow a perfect maze over a `width × height` logical grid: `width`
    /// logical columns along x and `height` logical rows along y.
    ///
    /// The result is a spanning tree: every cell is reachable from every
    /// other by exactly one route.
    pub fn carve(&mut self, width: i32, height: i32) -> Result<Maze, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidGridDimensions { width, height });
        }
        let mut maze = Maze::new(width, height);
        maze.cell_mut(0).open = false;
        let mut work: Vec<usize> = vec![0];

        while !work.is_empty() {
            let pick = if self.rng.random_range(0..BRANCH_ODDS) == 0 {
                self.rng.random_range(0..work.len())
            } else {
                work.len() - 1
            };
            let ci = work.remove(pick);
            let p = maze.cell(ci).pos;

            let candidates: Vec<usize> = [
                p.shift(1, 0),
                p.shift(0, 1),
                p.shift(-1, 0),
                p.shift(0, -1),
            ]
            .into_iter()
            .filter_map(|n| maze.index(n))
            .filter(|&ni| maze.cell(ni).open)
            .collect();

            if candidates.is_empty() {
                continue;
            }

            let ni = candidates[self.rng.random_range(0..candidates.len())];
            maze.cell_mut(ni).open = false;
            maze.link(ci, ni);
            work.push(ci);
            work.push(ni);
        }

        debug!(
            "carved {}x{} maze with {} passages",
            width,
            height,
            maze.edge_count()
        );
        Ok(maze)
    }

    /// Generate a maze and return it as an obstacle grid of `2·width+1`
    /// columns by `2·height+1` rows. `width` counts logical columns and
    /// `height` logical rows.
    pub fn generate(&mut self, width: i32, height: i32) -> Result<Grid, MazeError> {
        Ok(self.carve(width, height)?.to_grid())
    }

    /// Generate a maze filling the grid described by `config`, with the
    /// default endpoints placed.
    ///
    /// Even dimensions are reduced by one first, so the grid may be one row
    /// or column smaller than configured.
    pub fn generate_for(&mut self, config: &GridConfig) -> Result<Grid, MazeError> {
        config.validate()?;
        let (rows, cols) = config.maze_dimensions();
        let mut grid = self.generate(cols / 2, rows / 2)?;
        let sized = GridConfig::new(rows, cols);
        grid.place_endpoints(sized.start(), sized.target());
        Ok(grid)
    }
}

/// Logical cell that lands on grid position `p`, if `p` is a cell centre.
pub fn logical_cell(p: Point) -> Option<Point> {
    if p.x % 2 == 1 && p.y % 2 == 1 {
        Some(Point::new(p.x / 2, p.y / 2))
    } else {
        None
    }
}

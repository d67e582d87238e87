//! The logical maze graph and its expansion into an obstacle grid.

use pathviz_core::{CellState, Grid, Point};

/// A logical maze cell used while growing the spanning tree.
#[derive(Debug, Clone)]
pub(crate) struct MazeCell {
    pub(crate) pos: Point,
    /// Still available to be joined to the tree.
    pub(crate) open: bool,
    /// Indices of the cells this one has a passage to.
    links: Vec<usize>,
}

impl MazeCell {
    fn new(pos: Point) -> Self {
        Self {
            pos,
            open: true,
            links: Vec::new(),
        }
    }
}

/// A `width × height` logical maze. Passages are undirected: linking `a` to
/// `b` also links `b` to `a`.
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Create a maze with every cell open and no passages.
    pub(crate) fn new(width: i32, height: i32) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| MazeCell::new(Point::new(x, y))))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Logical size (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    pub(crate) fn cell(&self, i: usize) -> &MazeCell {
        &self.cells[i]
    }

    pub(crate) fn cell_mut(&mut self, i: usize) -> &mut MazeCell {
        &mut self.cells[i]
    }

    /// Join two cells with a passage.
    pub(crate) fn link(&mut self, a: usize, b: usize) {
        if !self.cells[a].links.contains(&b) {
            self.cells[a].links.push(b);
        }
        if !self.cells[b].links.contains(&a) {
            self.cells[b].links.push(a);
        }
    }

    /// Number of logical cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of passages (undirected edges).
    pub fn edge_count(&self) -> usize {
        self.cells.iter().map(|c| c.links.len()).sum::<usize>() / 2
    }

    /// Cells reachable from `p` through a single passage.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        match self.index(p) {
            Some(i) => self.cells[i]
                .links
                .iter()
                .map(|&j| self.cells[j].pos)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether a passage joins `a` and `b` directly.
    pub fn is_connected(&self, a: Point, b: Point) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(i), Some(j)) => self.cells[i].links.contains(&j),
            _ => false,
        }
    }

    /// Expand the maze into a `(2·width+1) × (2·height+1)` obstacle grid.
    ///
    /// Logical cell `(x, y)` lands on `(2x+1, 2y+1)`; a passage to the cell
    /// below or to the right opens the wall cell in between. Everything else
    /// is an obstacle.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(2 * self.width + 1, 2 * self.height + 1);
        grid.fill(CellState::Obstacle);
        for c in &self.cells {
            let g = Point::new(2 * c.pos.x + 1, 2 * c.pos.y + 1);
            grid.set(g, CellState::Empty);
            if self.is_connected(c.pos, c.pos.shift(0, 1)) {
                grid.set(g.shift(0, 1), CellState::Empty);
            }
            if self.is_connected(c.pos, c.pos.shift(1, 0)) {
                grid.set(g.shift(1, 0), CellState::Empty);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_symmetric_and_deduplicated() {
        let mut m = Maze::new(2, 1);
        m.link(0, 1);
        m.link(1, 0);
        assert_eq!(m.edge_count(), 1);
        assert!(m.is_connected(Point::new(0, 0), Point::new(1, 0)));
        assert!(m.is_connected(Point::new(1, 0), Point::new(0, 0)));
        assert_eq!(m.neighbors(Point::new(1, 0)), vec![Point::new(0, 0)]);
    }

    #[test]
    fn to_grid_opens_cells_and_passages() {
        let mut m = Maze::new(2, 2);
        // A U shape: (0,0)-(0,1)-(1,1)-(1,0)
        m.link(0, 2);
        m.link(2, 3);
        m.link(3, 1);
        let g = m.to_grid();
        assert_eq!(
            g.to_string(),
            "#####\n\
             #.#.#\n\
             #.#.#\n\
             #...#\n\
             #####"
        );
    }

    #[test]
    fn out_of_range_queries_are_empty() {
        let m = Maze::new(1, 1);
        assert!(m.neighbors(Point::new(3, 3)).is_empty());
        assert!(!m.is_connected(Point::new(0, 0), Point::new(-1, 0)));
    }
}

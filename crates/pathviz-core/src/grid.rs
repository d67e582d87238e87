//! The obstacle grid and its per-cell classification.
//!
//! [`Grid`] is a dense row-major array of [`CellState`] values. The
//! presentation layer edits obstacles and reads classifications back to
//! render; the search engine writes the search-progress markers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geom::{Point, Range};

/// Classification of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    /// The start position. Exactly one per grid.
    Robot,
    /// The goal position. Exactly one per grid.
    Target,
    /// Discovered but not yet expanded.
    Frontier,
    /// Expanded.
    Closed,
    /// Part of the reconstructed route.
    Route,
}

impl CellState {
    /// Whether this is one of the markers written during a search.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Closed | Self::Route)
    }

    /// Whether a search may step onto a cell in this state.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }

    /// Whether this is the Robot or Target marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Robot | Self::Target)
    }

    /// Character used by the text form of a [`Grid`].
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle => '#',
            Self::Robot => 'S',
            Self::Target => 'T',
            Self::Frontier => 'o',
            Self::Closed => 'x',
            Self::Route => '*',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            '#' => Self::Obstacle,
            'S' => Self::Robot,
            'T' => Self::Target,
            'o' => Self::Frontier,
            'x' => Self::Closed,
            '*' => Self::Route,
            _ => return None,
        })
    }
}

/// Errors produced when parsing the text form of a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// A line has a different width than the first one.
    #[error("grid line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the cell alphabet was found.
    #[error("invalid cell character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
    /// A serialized grid whose cell list does not match its dimensions.
    #[error("a {width}x{height} grid cannot hold {cells} cells")]
    SizeMismatch { width: i32, height: i32, cells: usize },
}

/// A fixed-size 2D grid of [`CellState`] values, `width` columns by
/// `height` rows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    cells: Vec<CellState>,
    width: i32,
    height: i32,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<CellState>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridParseError;

    fn try_from(r: GridRepr) -> Result<Self, Self::Error> {
        let expected = i64::from(r.width) * i64::from(r.height);
        if r.width < 0 || r.height < 0 || expected != r.cells.len() as i64 {
            return Err(GridParseError::SizeMismatch {
                width: r.width,
                height: r.height,
                cells: r.cells.len(),
            });
        }
        Ok(Self {
            cells: r.cells,
            width: r.width,
            height: r.height,
        })
    }
}

impl Grid {
    /// Create a grid where every cell is [`CellState::Empty`].
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![CellState::Empty; (width * height) as usize],
            width,
            height,
        }
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds().offset(p)
    }

    /// Returns the bounding range of the grid.
    pub fn bounds(&self) -> Range {
        Range::new(self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.index(p) {
            self.cells[i] = state;
        }
    }

    /// Whether `p` holds an obstacle. Out-of-bounds points are not obstacles;
    /// callers check bounds separately.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.at(p) == Some(CellState::Obstacle)
    }

    /// Add or remove an obstacle at `p`.
    ///
    /// The Robot and Target cells are never overwritten. Returns whether the
    /// cell changed.
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let old = self.cells[i];
        if old.is_endpoint() {
            return false;
        }
        let new = if obstacle {
            CellState::Obstacle
        } else {
            CellState::Empty
        };
        self.cells[i] = new;
        old != new
    }

    /// Fill the entire grid with the given state.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Reset every cell to [`CellState::Empty`].
    pub fn clear(&mut self) {
        self.fill(CellState::Empty);
    }

    /// Turn every Frontier, Closed and Route marker back into Empty, keeping
    /// obstacles and endpoints.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_search_mark() {
                *c = CellState::Empty;
            }
        }
    }

    /// Move the Robot and Target markers to `start` and `target`.
    ///
    /// Any previous Robot/Target cells become Empty so that exactly one of
    /// each remains. Points out of bounds are ignored.
    pub fn place_endpoints(&mut self, start: Point, target: Point) {
        for c in self.cells.iter_mut() {
            if c.is_endpoint() {
                *c = CellState::Empty;
            }
        }
        self.set(target, CellState::Target);
        self.set(start, CellState::Robot);
    }

    /// Position of the first cell equal to `state`, in row-major order.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.iter().find(|&(_, c)| c == state).map(|(p, _)| p)
    }

    /// Position of the Robot marker, if placed.
    pub fn robot(&self) -> Option<Point> {
        self.find(CellState::Robot)
    }

    /// Position of the Target marker, if placed.
    pub fn target(&self) -> Option<Point> {
        self.find(CellState::Target)
    }

    /// Count how many cells equal the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// All positions holding `state`, in row-major order.
    pub fn cells_in(&self, state: CellState) -> Vec<Point> {
        self.iter()
            .filter_map(|(p, c)| (c == state).then_some(p))
            .collect()
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, c) in self.iter() {
            if p.x == 0 && p.y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", c.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parse the text form produced by `Display`. Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Grid::new(width as i32, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let state = CellState::from_char(ch).ok_or(GridParseError::InvalidChar { ch, pos })?;
                grid.set(pos, state);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let g = Grid::new(4, 3);
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.count(CellState::Empty), 12);
        assert_eq!(g.at(Point::new(3, 2)), Some(CellState::Empty));
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
    }

    #[test]
    fn set_out_of_bounds_is_ignored() {
        let mut g = Grid::new(2, 2);
        g.set(Point::new(5, 5), CellState::Obstacle);
        assert_eq!(g.count(CellState::Obstacle), 0);
    }

    #[test]
    fn place_endpoints_keeps_one_of_each() {
        let mut g = Grid::new(5, 5);
        g.place_endpoints(Point::new(0, 0), Point::new(4, 4));
        g.place_endpoints(Point::new(1, 1), Point::new(3, 3));
        assert_eq!(g.count(CellState::Robot), 1);
        assert_eq!(g.count(CellState::Target), 1);
        assert_eq!(g.robot(), Some(Point::new(1, 1)));
        assert_eq!(g.target(), Some(Point::new(3, 3)));
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Empty));
    }

    #[test]
    fn obstacles_never_replace_endpoints() {
        let mut g = Grid::new(3, 3);
        g.place_endpoints(Point::new(0, 0), Point::new(2, 2));
        assert!(!g.set_obstacle(Point::new(0, 0), true));
        assert!(!g.set_obstacle(Point::new(2, 2), true));
        assert!(g.set_obstacle(Point::new(1, 1), true));
        assert!(!g.set_obstacle(Point::new(1, 1), true));
        assert!(g.is_obstacle(Point::new(1, 1)));
        assert!(g.set_obstacle(Point::new(1, 1), false));
        assert!(!g.is_obstacle(Point::new(1, 1)));
    }

    #[test]
    fn clear_search_marks_keeps_layout() {
        let mut g: Grid = "S.x\n#o*\n..T".parse().unwrap();
        g.clear_search_marks();
        assert_eq!(g.to_string(), "S..\n#..\n..T");
    }

    #[test]
    fn text_form_round_trips() {
        let text = "S..#\n.##.\n...T";
        let g: Grid = text.parse().unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.robot(), Some(Point::new(0, 0)));
        assert_eq!(g.target(), Some(Point::new(3, 2)));
        assert_eq!(g.cells_in(CellState::Obstacle).len(), 3);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = "...\n..".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridParseError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_chars() {
        let err = "..\n.?".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridParseError::InvalidChar {
                ch: '?',
                pos: Point::new(1, 1)
            }
        );
    }
}

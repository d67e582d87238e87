//! Geometry primitives: [`Point`] and the grid [`Range`].
//!
//! `x` is the column and `y` the row; rows grow downwards.

use std::fmt;
use std::ops::Sub;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A grid coordinate. X is the column, Y is the row (row 0 is the top).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point from a column and a row.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// All eight neighbours, clockwise from straight up. Searches visit
    /// successors in this order.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            self.shift(0, -1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
            self.shift(0, 1),
            self.shift(-1, 1),
            self.shift(-1, 0),
            self.shift(-1, -1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The cells of a `width × height` grid anchored at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    size: Point,
}

impl Range {
    /// Range covering `width` columns and `height` rows. Negative sizes give
    /// an empty range.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Point::new(width.max(0), height.max(0)),
        }
    }

    /// Whether `p` lies inside the range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size.x && p.y < self.size.y
    }

    /// Row-major offset of `p`, or `None` outside the range.
    #[inline]
    pub fn offset(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| (p.y as usize) * (self.size.x as usize) + p.x as usize)
    }

    /// Every point of the range in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        let w = self.size.x;
        (0..self.size.y).flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
    }
}

//! Field coordinate types.
//!
//! Two coordinate systems coexist because the two contact strategies need
//! different resolutions: `Cell` is the discrete grid coordinate, `Point` the
//! continuous-surface coordinate.  Both use screen orientation — the origin is
//! the top-left corner and `y` grows downward — matching the render frames
//! handed to the presentation layer.
//!
//! Neither type enforces field bounds on its own; the owning field is the only
//! mutator of agent placement and clamps every move.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A discrete grid cell.  Valid cells satisfy `x < width`, `y < height` of the
/// owning grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A continuous 2-D coordinate stored as single-precision floats.
///
/// `f32` keeps the SoA position arrays half the size of `f64`; at field sizes
/// of a few thousand units the precision loss is far below one agent radius.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<Cell> for Point {
    /// A cell renders at its integer coordinate.
    #[inline]
    fn from(cell: Cell) -> Point {
        Point::new(cell.x as f32, cell.y as f32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

//! Grid coordinates.
//!
//! `x` grows to the right and `y` grows downward, so row 0 is the top row.
//! A `Position` knows nothing about grid bounds; the grid checks them.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
///
/// Ordered row-major (by `y`, then `x`) so sorted positions read like text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0-based from the left edge.
    pub x: usize,
    /// Row, 0-based from the top edge.
    pub y: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Flat row-major index for a grid of the given width.
    #[must_use]
    pub const fn index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }

    /// Check if this position lies on a `width` x `height` grid.
    #[must_use]
    pub const fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

//! Grid slots.
//!
//! A `Cell` holds an optional tile value and a lock flag. The lock marks a
//! cell produced by a merge during the current move so it cannot merge a
//! second time before the next move clears it.

use serde::{Deserialize, Serialize};

/// Tile value type. Tiles are always `unit * 2^k`.
pub type Value = u64;

/// Check if `value` is a tile reachable from `unit` by doubling (`k >= 0`).
///
/// ```
/// use rust_2048::core::is_tile_value;
///
/// assert!(is_tile_value(8, 2));
/// assert!(is_tile_value(2, 2));
/// assert!(!is_tile_value(6, 2));
/// assert!(!is_tile_value(1, 2));
/// ```
#[must_use]
pub fn is_tile_value(value: Value, unit: Value) -> bool {
    if unit == 0 || value < unit || value % unit != 0 {
        return false;
    }
    (value / unit).is_power_of_two()
}

/// A single slot on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    value: Option<Value>,
    locked: bool,
}

impl Cell {
    /// An empty, unlocked cell.
    pub const EMPTY: Cell = Cell {
        value: None,
        locked: false,
    };

    /// An unlocked cell holding `value`.
    #[must_use]
    pub const fn with_value(value: Value) -> Self {
        Self {
            value: Some(value),
            locked: false,
        }
    }

    /// The tile value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<Value> {
        self.value
    }

    /// Check if this slot has no tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Check if this cell already merged during the current move.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set(&mut self, value: Option<Value>) {
        self.value = value;
    }

    /// Remove and return the tile.
    pub(crate) fn take(&mut self) -> Option<Value> {
        self.value.take()
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("."),
        }
    }
}

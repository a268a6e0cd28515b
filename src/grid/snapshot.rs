//! Observable grid state.
//!
//! A `Snapshot` is what an undo step restores and what an external
//! persistence layer would save: tile values, score, counters, the
//! victory flag and the RNG position. It carries no configuration; pair it
//! with the `GridConfig` it came from when rebuilding a grid.

use serde::{Deserialize, Serialize};

use crate::core::{GameRngState, Position, Value};

/// Point-in-time copy of a grid's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Tile values in row-major order, `None` for empty cells.
    pub values: Vec<Option<Value>>,
    /// Score at the time of the snapshot.
    pub score: u64,
    /// Moves attempted, including no-ops.
    pub attempts: u64,
    /// Moves that changed the grid.
    pub cycles: u64,
    /// The winning value has been reached this game.
    pub victory: bool,
    /// RNG position, so spawns replay identically after a restore.
    pub rng: GameRngState,
}

impl Snapshot {
    /// Value at `pos`, or `None` for an empty or out-of-range cell.
    #[must_use]
    pub fn value_at(&self, pos: Position) -> Option<Value> {
        if !pos.in_bounds(self.width, self.height) {
            return None;
        }
        self.values.get(pos.index(self.width)).copied().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

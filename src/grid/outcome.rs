//! What a single move did.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Position, Value};

/// Why a game ended on a jammed grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// Jammed after the winning value had already been reached.
    OverVictory,
    /// Jammed without ever reaching the winning value.
    Loss,
}

/// Result of `Grid::make_move`.
///
/// A no-op move has `changed == false`, no spawn, no score gain and never
/// reports a new victory. It can still carry an `ending` when the grid was
/// already jammed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Direction that was applied.
    pub direction: Direction,
    /// Any tile moved or merged.
    pub changed: bool,
    /// Score gained from merges.
    pub gained: Value,
    /// Number of merges performed.
    pub merges: usize,
    /// Where the new unit tile appeared.
    pub spawned: Option<Position>,
    /// The winning value was reached for the first time this game.
    pub victory: bool,
    /// The grid is jammed and the game is over.
    pub ending: Option<Ending>,
}

impl MoveOutcome {
    pub(crate) fn no_change(direction: Direction, ending: Option<Ending>) -> Self {
        Self {
            direction,
            changed: false,
            gained: 0,
            merges: 0,
            spawned: None,
            victory: false,
            ending,
        }
    }

    /// Check if the move left the grid untouched.
    #[must_use]
    pub fn is_no_change(&self) -> bool {
        !self.changed
    }

    /// Check if this move produced the first victory.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.victory
    }

    /// Check if the game ended after a prior victory.
    #[must_use]
    pub fn is_overvictory(&self) -> bool {
        self.ending == Some(Ending::OverVictory)
    }

    /// Check if the game ended without a victory.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.ending == Some(Ending::Loss)
    }

    /// Check if no further move can change the grid.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.ending.is_some()
    }
}

//! The frontend contract.
//!
//! A session never renders or reads input itself; it calls out to a
//! `Frontend`. Five operations are required. The remaining hooks have
//! empty default bodies and exist so a frontend can redraw or log at each
//! step of the cycle.
//!
//! `choose_direction` is the only call that may block. A frontend that
//! gathers input on another thread does its own coordination (see
//! `ChannelFrontend`) and only has to return eventually.

use crate::core::{Direction, GameError};
use crate::grid::{Grid, MoveOutcome};

/// What the player wants to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Slide the tiles.
    Move(Direction),
    /// Stop playing.
    Quit,
}

impl From<Direction> for Choice {
    fn from(direction: Direction) -> Self {
        Choice::Move(direction)
    }
}

/// Capabilities a session needs from whatever is presenting the game.
///
/// `Error` is what `choose_direction` fails with. Engine errors must
/// convert into it so a session can return a single error type; frontend
/// errors pass through the session untouched.
pub trait Frontend {
    /// Error type for failed input collection.
    type Error: From<GameError>;

    /// Block until the player picks a direction or asks to quit.
    fn choose_direction(&mut self) -> Result<Choice, Self::Error>;

    /// The player quit.
    fn on_player_quit(&mut self);

    /// The winning value was reached. Fired at most once per game.
    fn on_player_victory(&mut self);

    /// The grid jammed after a victory.
    fn on_player_overvictory(&mut self);

    /// The grid jammed without a victory.
    fn on_player_loss(&mut self);

    // === Optional hooks ===

    /// Before the first input request of a game.
    fn on_play(&mut self, _grid: &Grid) {}

    /// Before every input request.
    fn on_attempt(&mut self, _grid: &Grid) {}

    /// After a direction was chosen, before it is applied.
    fn after_choice(&mut self, _direction: Direction) {}

    /// After a move changed the grid.
    fn after_change(&mut self, _grid: &Grid, _outcome: &MoveOutcome) {}

    /// After a move that changed nothing.
    fn after_nochange(&mut self, _grid: &Grid, _direction: Direction) {}

    /// After every applied move, changed or not, before any victory or
    /// terminal notification.
    fn after_attempt(&mut self, _grid: &Grid, _direction: Direction) {}

    /// When the game reaches a terminal phase, before the notification.
    fn after_play(&mut self, _grid: &Grid) {}
}

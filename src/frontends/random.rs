//! Frontend that plays random moves.

use tracing::debug;

use super::Notification;
use crate::core::{Direction, GameError, GameRng};
use crate::session::{Choice, Frontend};

/// Chooses uniformly among the four directions.
///
/// Deterministic for a given seed. With a move cap it quits once the cap
/// is reached; without one it plays until the grid jams.
#[derive(Clone, Debug)]
pub struct RandomFrontend {
    rng: GameRng,
    max_moves: Option<u64>,
    moves: u64,
    notifications: Vec<Notification>,
}

impl RandomFrontend {
    /// Create a random player with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            max_moves: None,
            moves: 0,
            notifications: Vec::new(),
        }
    }

    /// Quit after `max` directions have been chosen.
    #[must_use]
    pub fn with_max_moves(mut self, max: u64) -> Self {
        self.max_moves = Some(max);
        self
    }

    /// Directions chosen so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Notifications received, in order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl Frontend for RandomFrontend {
    type Error = GameError;

    fn choose_direction(&mut self) -> Result<Choice, GameError> {
        if self.max_moves.is_some_and(|max| self.moves >= max) {
            debug!(moves = self.moves, "move cap reached");
            return Ok(Choice::Quit);
        }
        self.moves += 1;
        let direction = Direction::ALL[self.rng.gen_index(Direction::ALL.len())];
        Ok(Choice::Move(direction))
    }

    fn on_player_quit(&mut self) {
        self.notifications.push(Notification::Quit);
    }

    fn on_player_victory(&mut self) {
        self.notifications.push(Notification::Victory);
    }

    fn on_player_overvictory(&mut self) {
        self.notifications.push(Notification::OverVictory);
    }

    fn on_player_loss(&mut self) {
        self.notifications.push(Notification::Loss);
    }
}

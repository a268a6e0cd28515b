//! Frontend that replays a fixed script.

use std::collections::VecDeque;

use super::Notification;
use crate::core::{Direction, GameError};
use crate::grid::{Grid, MoveOutcome};
use crate::session::{Choice, Frontend};

/// Replays queued choices, then quits once the script runs out.
///
/// ```
/// use rust_2048::{Direction, Grid, GridConfig, Session};
/// use rust_2048::frontends::{Notification, ScriptedFrontend};
///
/// let grid = Grid::new(GridConfig::default()).unwrap();
/// let mut frontend = ScriptedFrontend::new([Direction::Left, Direction::Up]);
/// let mut session = Session::new(grid, &mut frontend).unwrap();
/// session.run().unwrap();
/// drop(session);
///
/// assert_eq!(frontend.requests(), 3);
/// assert_eq!(frontend.notifications(), &[Notification::Quit]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedFrontend {
    script: VecDeque<Choice>,
    notifications: Vec<Notification>,
    requests: usize,
    changes: usize,
    no_changes: usize,
    last_score: u64,
}

impl ScriptedFrontend {
    /// Script a sequence of moves.
    pub fn new(directions: impl IntoIterator<Item = Direction>) -> Self {
        Self::with_choices(directions.into_iter().map(Choice::Move))
    }

    /// Script arbitrary choices, including explicit quits.
    pub fn with_choices(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: choices.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Append more choices to the script.
    pub fn push(&mut self, choice: impl Into<Choice>) {
        self.script.push_back(choice.into());
    }

    /// Notifications received, in order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// How often a given notification was received.
    #[must_use]
    pub fn count(&self, notification: Notification) -> usize {
        self.notifications.iter().filter(|n| **n == notification).count()
    }

    /// Number of `choose_direction` calls.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Moves that changed the grid.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Moves that changed nothing.
    #[must_use]
    pub fn no_changes(&self) -> usize {
        self.no_changes
    }

    /// Score seen after the most recent changing move.
    #[must_use]
    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    /// Choices not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Frontend for ScriptedFrontend {
    type Error = GameError;

    fn choose_direction(&mut self) -> Result<Choice, GameError> {
        self.requests += 1;
        Ok(self.script.pop_front().unwrap_or(Choice::Quit))
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

    fn after_change(&mut self, grid: &Grid, _outcome: &MoveOutcome) {
        self.changes += 1;
        self.last_score = grid.score();
    }

    fn after_nochange(&mut self, _grid: &Grid, _direction: Direction) {
        self.no_changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_quit() {
        let mut frontend = ScriptedFrontend::new([Direction::Up]);
        assert_eq!(frontend.remaining(), 1);
        assert_eq!(frontend.choose_direction(), Ok(Choice::Move(Direction::Up)));
        assert_eq!(frontend.choose_direction(), Ok(Choice::Quit));
        assert_eq!(frontend.requests(), 2);
    }

    #[test]
    fn test_push_and_count() {
        let mut frontend = ScriptedFrontend::default();
        frontend.push(Direction::Left);
        frontend.push(Choice::Quit);
        assert_eq!(frontend.remaining(), 2);

        frontend.on_player_victory();
        frontend.on_player_loss();
        assert_eq!(frontend.count(Notification::Victory), 1);
        assert_eq!(frontend.count(Notification::Quit), 0);
        assert_eq!(frontend.notifications(), &[Notification::Victory, Notification::Loss]);
    }
}

//! Frontend fed from another thread.
//!
//! A GUI or network loop keeps the `Sender<Choice>` and pushes choices as
//! the player acts; the session thread blocks in `choose_direction` until
//! one arrives. Dropping the sender is treated as a quit. Notifications go
//! back over a second channel.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use super::Notification;
use crate::core::GameError;
use crate::session::{Choice, Frontend};

/// Channel-backed frontend.
///
/// ```
/// use std::thread;
/// use rust_2048::{Direction, Grid, GridConfig, Phase, Session};
/// use rust_2048::frontends::{ChannelFrontend, Notification};
///
/// let (choices, notifications, mut frontend) = ChannelFrontend::pair();
///
/// let player = thread::spawn(move || {
///     choices.send(Direction::Left.into()).unwrap();
///     // Dropping the sender quits the game
/// });
///
/// let grid = Grid::new(GridConfig::default()).unwrap();
/// let mut session = Session::new(grid, &mut frontend).unwrap();
/// assert_eq!(session.run().unwrap(), Phase::Quit);
/// player.join().unwrap();
///
/// assert_eq!(notifications.recv().unwrap(), Notification::Quit);
/// ```
#[derive(Debug)]
pub struct ChannelFrontend {
    choices: Receiver<Choice>,
    notifications: Sender<Notification>,
}

impl ChannelFrontend {
    /// Wrap existing channel ends.
    pub fn new(choices: Receiver<Choice>, notifications: Sender<Notification>) -> Self {
        Self {
            choices,
            notifications,
        }
    }

    /// Create the frontend together with the ends the other thread keeps.
    pub fn pair() -> (Sender<Choice>, Receiver<Notification>, Self) {
        let (choice_tx, choice_rx) = mpsc::channel();
        let (note_tx, note_rx) = mpsc::channel();
        (choice_tx, note_rx, Self::new(choice_rx, note_tx))
    }

    fn notify(&self, notification: Notification) {
        // Nobody listening is fine; the game result is still in the session
        if self.notifications.send(notification).is_err() {
            debug!(?notification, "notification receiver dropped");
        }
    }
}

impl Frontend for ChannelFrontend {
    type Error = GameError;

    fn choose_direction(&mut self) -> Result<Choice, GameError> {
        match self.choices.recv() {
            Ok(choice) => Ok(choice),
            Err(_) => {
                debug!("choice sender dropped, quitting");
                Ok(Choice::Quit)
            }
        }
    }

    fn on_player_quit(&mut self) {
        self.notify(Notification::Quit);
    }

    fn on_player_victory(&mut self) {
        self.notify(Notification::Victory);
    }

    fn on_player_overvictory(&mut self) {
        self.notify(Notification::OverVictory);
    }

    fn on_player_loss(&mut self) {
        self.notify(Notification::Loss);
    }
}

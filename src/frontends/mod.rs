//! Ready-made frontends.
//!
//! - `ScriptedFrontend`: replays a fixed list of choices (tests, replays)
//! - `RandomFrontend`: picks random directions from a seeded RNG
//! - `ChannelFrontend`: takes choices from another thread over a channel
//!
//! All of them record terminal notifications as `Notification` values.

mod channel;
mod random;
mod scripted;

pub use channel::ChannelFrontend;
pub use random::RandomFrontend;
pub use scripted::ScriptedFrontend;

use serde::{Deserialize, Serialize};

/// A terminal or victory notification received from a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notification {
    /// `on_player_quit`
    Quit,
    /// `on_player_victory`
    Victory,
    /// `on_player_overvictory`
    OverVictory,
    /// `on_player_loss`
    Loss,
}

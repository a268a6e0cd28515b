//! Sessions: one grid driven by one frontend until the game ends.
//!
//! - `Frontend`: the capability set a presentation layer implements
//! - `Session`: the turn-cycle state machine
//! - `Phase` / `SessionConfig`: cycle state and behavior switches

pub mod frontend;
pub mod state;

pub use frontend::{Choice, Frontend};
pub use state::{Phase, Session, SessionConfig};

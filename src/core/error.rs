//! Engine error taxonomy.
//!
//! - `Configuration`: bad construction parameters. Surfaced when a grid,
//!   snapshot or session is built; never produced mid-game.
//! - `InvalidArgument`: a malformed value from outside the engine, such as an
//!   unknown direction code. The grid is never touched.
//! - `InvariantViolation`: the engine's own bookkeeping is inconsistent.
//!   This is a bug, not a player-facing condition, and callers must not
//!   swallow it.

/// Errors produced by the grid and session.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Invalid grid or session configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed input handed to the engine.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal consistency failure.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl GameError {
    /// Check if this error indicates an engine bug.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::InvariantViolation(_))
    }
}

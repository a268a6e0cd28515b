//! The game grid and its move algorithm.
//!
//! - `Grid`: owns the cells, score, counters, RNG and undo history
//! - `MoveOutcome` / `Ending`: what a move did and whether the game is over
//! - `Snapshot`: serializable observable state for undo and persistence

pub mod engine;
mod line;
pub mod outcome;
pub mod snapshot;

pub use engine::Grid;
pub use outcome::{Ending, MoveOutcome};
pub use snapshot::Snapshot;

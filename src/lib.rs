//! # rust-2048
//!
//! A rule engine for the 2048 family of sliding-tile puzzles.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never renders or reads input.
//!    A session calls out to a `Frontend` for every decision and event.
//!
//! 2. **Configurable Rules**: Grid size, unit value, winning value and the
//!    opening placement all come from `GridConfig`.
//!
//! 3. **Deterministic**: All randomness flows through one seeded
//!    `GameRng`, so a seed and a list of moves replay exactly.
//!
//! ## Architecture
//!
//! - **Atomic Moves**: A move slides a scratch copy of the cells and only
//!   commits once the spawn has been placed.
//!
//! - **Persistent History**: Undo snapshots live in an `im::Vector`.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, cells, RNG, configuration, errors
//! - `grid`: The grid, the slide/merge algorithm, move outcomes, snapshots
//! - `session`: The frontend contract and the turn-cycle state machine
//! - `frontends`: Scripted, random and channel-driven frontends
//!
//! ## Example
//!
//! ```
//! use rust_2048::{Direction, Grid, GridConfig};
//!
//! let config = GridConfig::new().with_tiles([((0, 0), 2), ((1, 0), 2)]);
//! let mut grid = Grid::new(config).unwrap();
//!
//! let outcome = grid.make_move(Direction::Left).unwrap();
//! assert!(outcome.changed);
//! assert_eq!(grid.score(), 4);
//! assert_eq!(grid.value_at((0, 0).into()), Some(4));
//! ```

pub mod core;
pub mod frontends;
pub mod grid;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    is_tile_value, Cell, Direction, GameError, GameRng, GameRngState, GridConfig, Placement,
    Position, Value,
};

pub use crate::grid::{Ending, Grid, MoveOutcome, Snapshot};

pub use crate::session::{Choice, Frontend, Phase, Session, SessionConfig};

pub use crate::frontends::{ChannelFrontend, Notification, RandomFrontend, ScriptedFrontend};

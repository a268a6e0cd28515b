//! Core value types: positions, directions, cells, RNG, configuration, errors.
//!
//! These are the small building blocks the grid and session are made of.

pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod position;
pub mod rng;

pub use cell::{is_tile_value, Cell, Value};
pub use config::{GridConfig, Placement};
pub use direction::Direction;
pub use error::GameError;
pub use position::Position;
pub use rng::{GameRng, GameRngState};

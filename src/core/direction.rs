//! The four move directions.
//!
//! A `Direction` is always well formed once it exists. Raw input (numeric
//! codes from a bridge, text from a console) goes through `TryFrom<u8>` or
//! `FromStr`, which reject anything outside the four values with
//! `GameError::InvalidArgument`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::GameError;

/// A direction to slide tiles toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All directions, in the order jam detection tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether this direction moves tiles along rows.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Stable numeric code (0..4).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            other => Err(GameError::InvalidArgument(format!(
                "direction code must be 0-3, got {other}"
            ))),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts full names, WASD and vi keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Direction::Up),
            "down" | "s" | "j" => Ok(Direction::Down),
            "left" | "a" | "h" => Ok(Direction::Left),
            "right" | "d" | "l" => Ok(Direction::Right),
            _ => Err(GameError::InvalidArgument(format!(
                "unknown direction {s:?}; expected up, down, left or right"
            ))),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

//! Grid configuration.
//!
//! Everything a grid needs is supplied here at construction time:
//! - dimensions (each at least 2)
//! - the unit value new tiles spawn with and the winning value
//! - how the opening tiles are placed (`Placement`)
//! - the RNG seed and an optional cap on undo history
//!
//! `GridConfig::validate` is the single gate; `Grid::new` calls it.

use serde::{Deserialize, Serialize};

use super::cell::{is_tile_value, Value};
use super::error::GameError;
use super::position::Position;

/// How the opening tiles are placed on a fresh or reset grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// `count` unit tiles at distinct random empty positions.
    Random {
        /// Number of tiles to place.
        count: usize,
    },
    /// Exact tiles at exact positions. Positions not listed start empty.
    Fixed(Vec<(Position, Value)>),
    /// Every cell filled with a random tile below the winning value,
    /// re-rolled until at least one move is possible.
    Autofill,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Random { count: 2 }
    }
}

/// Complete grid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns (at least 2).
    pub width: usize,

    /// Number of rows (at least 2).
    pub height: usize,

    /// Value of every spawned tile. A power of two.
    pub unit_value: Value,

    /// Tile value that counts as a victory. `unit_value * 2^k`, `k >= 1`.
    pub winning_value: Value,

    /// Opening tile strategy.
    pub placement: Placement,

    /// Seed for the grid's RNG.
    pub seed: u64,

    /// Maximum snapshots kept for undo. `None` keeps them all.
    pub history_limit: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            unit_value: 2,
            winning_value: 2048,
            placement: Placement::default(),
            seed: 42,
            history_limit: None,
        }
    }
}

impl GridConfig {
    /// Create a default 4x4 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the winning tile value.
    #[must_use]
    pub fn with_winning_value(mut self, value: Value) -> Self {
        self.winning_value = value;
        self
    }

    /// Set the spawned tile value.
    #[must_use]
    pub fn with_unit_value(mut self, value: Value) -> Self {
        self.unit_value = value;
        self
    }

    /// Set the opening placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Shorthand for `Placement::Fixed`.
    #[must_use]
    pub fn with_tiles(self, tiles: impl IntoIterator<Item = ((usize, usize), Value)>) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|((x, y), v)| (Position::new(x, y), v))
            .collect();
        self.with_placement(Placement::Fixed(tiles))
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the undo history.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check every constraint, returning the first violation.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < 2 || self.height < 2 {
            return Err(GameError::Configuration(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.unit_value == 0 || !self.unit_value.is_power_of_two() {
            return Err(GameError::Configuration(format!(
                "unit value must be a power of two, got {}",
                self.unit_value
            )));
        }
        if self.winning_value <= self.unit_value
            || !is_tile_value(self.winning_value, self.unit_value)
        {
            return Err(GameError::Configuration(format!(
                "winning value {} is not reachable by doubling {}",
                self.winning_value, self.unit_value
            )));
        }
        if self.history_limit == Some(0) {
            return Err(GameError::Configuration("history limit must be at least 1".into()));
        }
        self.validate_placement()
    }

    fn validate_placement(&self) -> Result<(), GameError> {
        match &self.placement {
            Placement::Random { count } => {
                if *count == 0 || *count > self.cell_count() {
                    return Err(GameError::Configuration(format!(
                        "cannot place {} starting tiles on {} cells",
                        count,
                        self.cell_count()
                    )));
                }
            }
            Placement::Fixed(tiles) => {
                let mut seen = Vec::with_capacity(tiles.len());
                for &(pos, value) in tiles {
                    if !pos.in_bounds(self.width, self.height) {
                        return Err(GameError::Configuration(format!(
                            "tile position {pos} is outside a {}x{} grid",
                            self.width, self.height
                        )));
                    }
                    if !is_tile_value(value, self.unit_value) {
                        return Err(GameError::Configuration(format!(
                            "{value} at {pos} is not a valid tile for unit {}",
                            self.unit_value
                        )));
                    }
                    if seen.contains(&pos) {
                        return Err(GameError::Configuration(format!("duplicate tile at {pos}")));
                    }
                    seen.push(pos);
                }
            }
            Placement::Autofill => {}
        }
        Ok(())
    }

    /// Tile values `Placement::Autofill` draws from: unit up to half the goal.
    pub(crate) fn autofill_values(&self) -> Vec<Value> {
        std::iter::successors(Some(self.unit_value), |v| v.checked_mul(2))
            .take_while(|v| *v < self.winning_value)
            .collect()
    }
}

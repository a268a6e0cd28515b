//! The grid: cell storage, move processing, spawning and jam detection.
//!
//! ## Storage
//!
//! Cells live in a flat `Vec<Cell>` addressed by `y * width + x`, created
//! full and never resized, so every position always has a cell.
//!
//! ## A move
//!
//! 1. Clear every lock.
//! 2. Slide every line on a scratch copy (see `line`).
//! 3. No change: commit nothing else, but still report a jam.
//! 4. Change: pick a spawn position on the scratch copy, then commit
//!    cells, score and counters together and place one unit tile.
//! 5. Evaluate victory first, then over-victory or loss.
//!
//! The grid is plain owned data with no interior mutability; callers that
//! share one across threads must serialize access themselves.

use im::Vector;
use tracing::{debug, info, instrument};

use super::line::{slide_all, Slide};
use super::outcome::{Ending, MoveOutcome};
use super::snapshot::Snapshot;
use crate::core::{
    is_tile_value, Cell, Direction, GameError, GameRng, GameRngState, GridConfig, Placement,
    Position, Value,
};

/// Re-rolls `Placement::Autofill` may take before giving up.
const AUTOFILL_ATTEMPTS: usize = 10_000;

/// A width x height board of cells plus score and game progress.
#[derive(Clone, Debug)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<Cell>,
    score: u64,
    attempts: u64,
    cycles: u64,
    victory: bool,
    rng: GameRng,
    history: Vector<Snapshot>,
}

impl Grid {
    /// Build a grid and place its opening tiles.
    ///
    /// # Errors
    ///
    /// `GameError::Configuration` if `config` fails validation.
    ///
    /// ```
    /// use rust_2048::{Grid, GridConfig};
    ///
    /// let grid = Grid::new(GridConfig::default().with_seed(7)).unwrap();
    /// assert_eq!(grid.cells().len(), 16);
    /// assert_eq!(grid.tile_count(), 2);
    /// assert_eq!(grid.tile_sum(), 4);
    /// ```
    #[instrument(
        skip_all,
        fields(width = config.width, height = config.height, goal = config.winning_value)
    )]
    pub fn new(config: GridConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let mut grid = Self {
            cells: vec![Cell::EMPTY; config.cell_count()],
            config,
            score: 0,
            attempts: 0,
            cycles: 0,
            victory: false,
            rng,
            history: Vector::new(),
        };
        grid.place_opening()?;
        grid.store_snapshot();
        debug!(tiles = grid.tile_count(), "grid created");
        Ok(grid)
    }

    /// Rebuild a grid from a snapshot taken with the same configuration.
    ///
    /// The restored grid's history starts at the snapshot.
    ///
    /// # Errors
    ///
    /// `GameError::Configuration` if the config is invalid, the dimensions
    /// differ, or any value is not a tile for the configured unit.
    pub fn from_snapshot(config: GridConfig, snapshot: &Snapshot) -> Result<Self, GameError> {
        config.validate()?;
        if snapshot.width != config.width || snapshot.height != config.height {
            return Err(GameError::Configuration(format!(
                "snapshot is {}x{} but the configuration is {}x{}",
                snapshot.width, snapshot.height, config.width, config.height
            )));
        }
        if snapshot.values.len() != config.cell_count() {
            return Err(GameError::Configuration(format!(
                "snapshot has {} cells, expected {}",
                snapshot.values.len(),
                config.cell_count()
            )));
        }
        if let Some(bad) = snapshot
            .values
            .iter()
            .flatten()
            .find(|v| !is_tile_value(**v, config.unit_value))
        {
            return Err(GameError::Configuration(format!(
                "snapshot value {bad} is not a tile for unit {}",
                config.unit_value
            )));
        }

        let mut grid = Self {
            cells: vec![Cell::EMPTY; config.cell_count()],
            config,
            score: 0,
            attempts: 0,
            cycles: 0,
            victory: false,
            rng: GameRng::from_state(&snapshot.rng),
            history: Vector::new(),
        };
        grid.restore(snapshot);
        grid.store_snapshot();
        Ok(grid)
    }

    /// Apply one move.
    ///
    /// # Errors
    ///
    /// `GameError::InvariantViolation` if tiles moved but no empty cell is
    /// left for the spawn, or the score would overflow. The grid is not
    /// modified in that case apart from cleared locks and the attempt
    /// counter.
    ///
    /// Merges that would push the score past `u64::MAX` are refused; those
    /// tiles stay side by side.
    #[instrument(skip(self), fields(attempt = self.attempts + 1))]
    pub fn make_move(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        self.attempts += 1;
        self.unlock_all();

        let mut next = self.cells.clone();
        let slide = slide_all(
            &mut next,
            direction,
            self.config.width,
            self.config.height,
            self.score_headroom(),
        );

        if !slide.moved {
            debug!("no change");
            let ending = self.ending();
            return Ok(MoveOutcome::no_change(direction, ending));
        }

        let empties: Vec<usize> = (0..next.len()).filter(|&i| next[i].is_empty()).collect();
        if empties.is_empty() {
            return Err(GameError::InvariantViolation(format!(
                "moving {direction} changed the grid but left no empty cell"
            )));
        }
        let Some(score) = self.score.checked_add(slide.gained) else {
            return Err(GameError::InvariantViolation(format!(
                "score {} cannot absorb a gain of {}",
                self.score, slide.gained
            )));
        };
        let spawn_index = empties[self.rng.gen_index(empties.len())];
        next[spawn_index].set(Some(self.config.unit_value));

        self.cells = next;
        self.score = score;
        self.cycles += 1;
        let spawned = Position::from_index(spawn_index, self.config.width);
        debug!(
            merges = slide.merges,
            gained = slide.gained,
            score = self.score,
            cycle = self.cycles,
            %spawned,
            "grid changed"
        );

        let victory = !self.victory && self.largest() >= self.config.winning_value;
        if victory {
            self.victory = true;
            info!(goal = self.config.winning_value, score = self.score, "winning value reached");
        }
        let ending = self.ending();
        self.store_snapshot();

        let Slide { gained, merges, .. } = slide;
        Ok(MoveOutcome {
            direction,
            changed: true,
            gained,
            merges,
            spawned: Some(spawned),
            victory,
            ending,
        })
    }

    /// Check whether moving in `direction` would change the grid.
    ///
    /// Runs the slide on a copy; nothing is committed.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut scratch = self.cells.clone();
        scratch.iter_mut().for_each(Cell::unlock);
        let (width, height) = (self.config.width, self.config.height);
        slide_all(&mut scratch, direction, width, height, self.score_headroom()).moved
    }

    /// Score that can still be gained before the counter overflows.
    fn score_headroom(&self) -> Value {
        Value::MAX - self.score
    }

    /// Check if no direction can change the grid.
    #[must_use]
    pub fn is_jammed(&self) -> bool {
        if self.cells.iter().any(Cell::is_empty) {
            return false;
        }
        Direction::ALL.iter().all(|&dir| !self.can_move(dir))
    }

    fn ending(&self) -> Option<Ending> {
        if !self.is_jammed() {
            return None;
        }
        let ending = if self.victory {
            Ending::OverVictory
        } else {
            Ending::Loss
        };
        info!(?ending, score = self.score, largest = self.largest(), "grid jammed");
        Some(ending)
    }

    /// Empty every cell, clear progress and history, and re-place the
    /// opening tiles. The RNG keeps running.
    ///
    /// # Errors
    ///
    /// Only `InvariantViolation` from autofill, which should not happen.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.cells.iter_mut().for_each(|c| *c = Cell::EMPTY);
        self.score = 0;
        self.attempts = 0;
        self.cycles = 0;
        self.victory = false;
        self.history.clear();
        self.place_opening()?;
        self.store_snapshot();
        debug!("grid reset");
        Ok(())
    }

    /// A fresh grid with the same configuration, seeded from a fork of this
    /// grid's RNG.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::new`].
    pub fn new_game(&mut self) -> Result<Grid, GameError> {
        let seed = self.rng.fork().seed();
        Grid::new(self.config.clone().with_seed(seed))
    }

    /// Step back to the state before the last changing move.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }
        self.history.pop_back();
        let Some(previous) = self.history.back().cloned() else {
            return false;
        };
        self.restore(&previous);
        debug!(cycle = self.cycles, remaining = self.history.len(), "undo");
        true
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.config.width,
            height: self.config.height,
            values: self.cells.iter().map(Cell::value).collect(),
            score: self.score,
            attempts: self.attempts,
            cycles: self.cycles,
            victory: self.victory,
            rng: self.rng.state(),
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        for (cell, value) in self.cells.iter_mut().zip(&snapshot.values) {
            *cell = value.map_or(Cell::EMPTY, Cell::with_value);
        }
        self.score = snapshot.score;
        self.attempts = snapshot.attempts;
        self.cycles = snapshot.cycles;
        self.victory = snapshot.victory;
        self.rng = GameRng::from_state(&snapshot.rng);
    }

    fn store_snapshot(&mut self) {
        self.history.push_back(self.snapshot());
        if let Some(limit) = self.config.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    fn unlock_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::unlock);
    }

    fn place_opening(&mut self) -> Result<(), GameError> {
        match self.config.placement.clone() {
            Placement::Random { count } => {
                let indices: Vec<usize> = (0..self.cells.len()).collect();
                let unit = self.config.unit_value;
                for index in self.rng.choose_distinct(&indices, count) {
                    self.cells[index].set(Some(unit));
                }
            }
            Placement::Fixed(tiles) => {
                for (pos, value) in tiles {
                    let index = pos.index(self.config.width);
                    self.cells[index].set(Some(value));
                }
            }
            Placement::Autofill => self.autofill()?,
        }
        Ok(())
    }

    fn autofill(&mut self) -> Result<(), GameError> {
        let values = self.config.autofill_values();
        for _ in 0..AUTOFILL_ATTEMPTS {
            for index in 0..self.cells.len() {
                let value = self.rng.choose(&values).copied();
                self.cells[index].set(value);
            }
            if !self.is_jammed() {
                return Ok(());
            }
        }
        Err(GameError::InvariantViolation(format!(
            "autofill produced only jammed grids after {AUTOFILL_ATTEMPTS} attempts"
        )))
    }

    // === Accessors ===

    /// The configuration this grid was built with.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Target tile value.
    #[must_use]
    pub fn winning_value(&self) -> Value {
        self.config.winning_value
    }

    /// Sum of every merge so far.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Moves attempted, including no-ops.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Moves that changed the grid.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the winning value has been reached this game.
    #[must_use]
    pub fn victory_recorded(&self) -> bool {
        self.victory
    }

    /// Current RNG state.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Snapshots available to undo through, including the current state.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if !pos.in_bounds(self.config.width, self.config.height) {
            return None;
        }
        self.cells.get(pos.index(self.config.width))
    }

    /// Tile value at `pos`.
    #[must_use]
    pub fn value_at(&self, pos: Position) -> Option<Value> {
        self.get(pos).and_then(Cell::value)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.config.width)
    }

    /// Every position paired with its cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        let width = self.config.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::from_index(i, width), cell))
    }

    /// Positions without a tile.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Sum of every tile value, saturating at `Value::MAX`.
    #[must_use]
    pub fn tile_sum(&self) -> Value {
        self.cells
            .iter()
            .filter_map(Cell::value)
            .fold(0, Value::saturating_add)
    }

    /// Largest tile value, 0 on an empty grid.
    #[must_use]
    pub fn largest(&self) -> Value {
        self.cells.iter().filter_map(Cell::value).max().unwrap_or(0)
    }

    /// Check if the grid holds no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell_width = self.largest().max(1).to_string().len().max(4);
        let rule = "-".repeat((cell_width + 1) * self.config.width - 1);
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f, "{rule}")?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|cell| format!("{:>cell_width$}", cell.to_string()))
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

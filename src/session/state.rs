//! Turn-cycle state machine.
//!
//! ```text
//! AwaitingInput --choose_direction--> Processing --make_move--> AwaitingInput
//!       |                                  |
//!       +--quit--> Quit                    +--> Won | OverWon | Lost
//! ```
//!
//! `Won` is only reachable with `SessionConfig::stop_on_victory`; by
//! default the first victory is announced and play continues until the
//! grid jams (`OverWon`) or the player quits.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::frontend::{Choice, Frontend};
use crate::core::GameError;
use crate::grid::{Ending, Grid, MoveOutcome};

/// Where the session is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting on the frontend for a direction.
    AwaitingInput,
    /// Applying a move.
    Processing,
    /// Stopped at the first victory.
    Won,
    /// Jammed after a victory.
    OverWon,
    /// Jammed without a victory.
    Lost,
    /// The player quit.
    Quit,
}

impl Phase {
    /// Check if no further moves will be processed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::OverWon | Phase::Lost | Phase::Quit)
    }
}

/// Session behavior switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// End the session in `Won` at the first victory instead of playing on.
    pub stop_on_victory: bool,
}

impl SessionConfig {
    /// Create the default configuration (play on after victory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first victory.
    #[must_use]
    pub fn stop_on_victory(mut self) -> Self {
        self.stop_on_victory = true;
        self
    }
}

/// One play-through: a grid driven by a frontend.
///
/// The session owns its grid and borrows the frontend for its lifetime.
pub struct Session<'f, F: Frontend> {
    grid: Grid,
    frontend: &'f mut F,
    config: SessionConfig,
    phase: Phase,
    victory_announced: bool,
    started: bool,
}

impl<'f, F: Frontend> Session<'f, F> {
    /// Create a session with the default configuration.
    ///
    /// # Errors
    ///
    /// `GameError::Configuration` if the grid holds no tiles.
    pub fn new(grid: Grid, frontend: &'f mut F) -> Result<Self, GameError> {
        Self::with_config(grid, frontend, SessionConfig::default())
    }

    /// Create a session with an explicit configuration.
    ///
    /// # Errors
    ///
    /// `GameError::Configuration` if the grid holds no tiles.
    pub fn with_config(
        grid: Grid,
        frontend: &'f mut F,
        config: SessionConfig,
    ) -> Result<Self, GameError> {
        if grid.is_empty() {
            return Err(GameError::Configuration("cannot play on an empty grid".into()));
        }
        let victory_announced = grid.victory_recorded();
        Ok(Self {
            grid,
            frontend,
            config,
            phase: Phase::AwaitingInput,
            victory_announced,
            started: false,
        })
    }

    /// Run one cycle: ask for input, apply it, report terminal events.
    ///
    /// In a terminal phase this does nothing and returns that phase.
    ///
    /// # Errors
    ///
    /// Whatever `choose_direction` fails with, unchanged, or an engine
    /// `InvariantViolation` converted into `F::Error`. After an error the
    /// phase is `AwaitingInput` again and the grid holds its last
    /// committed state.
    pub fn step(&mut self) -> Result<Phase, F::Error> {
        if self.phase.is_terminal() {
            return Ok(self.phase);
        }
        let result = self.cycle();
        if result.is_err() {
            // Nothing was committed past the last good move
            self.phase = Phase::AwaitingInput;
        }
        result
    }

    fn cycle(&mut self) -> Result<Phase, F::Error> {
        if !self.started {
            self.started = true;
            self.frontend.on_play(&self.grid);
        }

        self.phase = Phase::AwaitingInput;
        self.frontend.on_attempt(&self.grid);
        let direction = match self.frontend.choose_direction()? {
            Choice::Move(direction) => direction,
            Choice::Quit => {
                self.finish(Phase::Quit);
                return Ok(self.phase);
            }
        };
        self.frontend.after_choice(direction);

        self.phase = Phase::Processing;
        let outcome = self.grid.make_move(direction).map_err(|err| {
            error!(%err, "move failed");
            err
        })?;
        if outcome.changed {
            self.frontend.after_change(&self.grid, &outcome);
        } else {
            self.frontend.after_nochange(&self.grid, direction);
        }
        self.frontend.after_attempt(&self.grid, direction);

        let next = self.resolve(&outcome);
        match next {
            Phase::AwaitingInput => self.phase = next,
            terminal => self.finish(terminal),
        }
        Ok(self.phase)
    }

    /// Cycle until a terminal phase.
    ///
    /// # Errors
    ///
    /// See [`Session::step`].
    #[instrument(skip(self), fields(goal = self.grid.winning_value()))]
    pub fn run(&mut self) -> Result<Phase, F::Error> {
        loop {
            let phase = self.step()?;
            if phase.is_terminal() {
                return Ok(phase);
            }
        }
    }

    /// Replace the grid with a fresh game and return to `AwaitingInput`.
    ///
    /// # Errors
    ///
    /// Propagates grid construction errors.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.grid = self.grid.new_game()?;
        self.phase = Phase::AwaitingInput;
        self.victory_announced = false;
        self.started = false;
        debug!("session restarted");
        Ok(())
    }

    /// Pick the phase after a move, firing the victory notification.
    fn resolve(&mut self, outcome: &MoveOutcome) -> Phase {
        if outcome.victory && !self.victory_announced {
            self.victory_announced = true;
            info!(score = self.grid.score(), "victory");
            self.frontend.on_player_victory();
        }
        match outcome.ending {
            Some(Ending::OverVictory) => Phase::OverWon,
            Some(Ending::Loss) => Phase::Lost,
            None if outcome.victory && self.config.stop_on_victory => Phase::Won,
            None => Phase::AwaitingInput,
        }
    }

    /// Enter a terminal phase and notify the frontend.
    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        info!(?phase, score = self.grid.score(), cycles = self.grid.cycles(), "session finished");
        self.frontend.after_play(&self.grid);
        match phase {
            Phase::Quit => self.frontend.on_player_quit(),
            Phase::OverWon => self.frontend.on_player_overvictory(),
            Phase::Lost => self.frontend.on_player_loss(),
            // Victory was already announced in `resolve`
            Phase::Won | Phase::AwaitingInput | Phase::Processing => {}
        }
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The grid being played.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The frontend driving this session.
    #[must_use]
    pub fn frontend(&self) -> &F {
        &*self.frontend
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the victory notification has fired this game.
    #[must_use]
    pub fn victory_announced(&self) -> bool {
        self.victory_announced
    }

    /// End the session and take back the grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

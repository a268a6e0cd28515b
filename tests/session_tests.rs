//! Session integration tests.
//!
//! These tests run complete sessions against the bundled frontends and a
//! few purpose-built ones, checking phase transitions and that every
//! notification fires exactly when it should.

use std::thread;

use rust_2048::{
    ChannelFrontend, Choice, Direction, Frontend, GameError, Grid, GridConfig, MoveOutcome,
    Notification, Phase, RandomFrontend, ScriptedFrontend, Session, SessionConfig, Value,
};

fn fixed(width: usize, height: usize, tiles: &[((usize, usize), Value)]) -> Grid {
    let config = GridConfig::new()
        .with_size(width, height)
        .with_tiles(tiles.iter().copied());
    Grid::new(config).unwrap()
}

fn packed_config() -> GridConfig {
    let mut tiles = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            tiles.push(((x, y), if (x + y) % 2 == 0 { 2 } else { 4 }));
        }
    }
    GridConfig::new().with_tiles(tiles)
}

// =============================================================================
// Terminal Transitions
// =============================================================================

/// A jammed grid without a victory ends the session in `Lost`.
#[test]
fn test_jammed_grid_loses() {
    let grid = Grid::new(packed_config()).unwrap();
    let mut frontend = ScriptedFrontend::new([Direction::Up, Direction::Down]);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    let phase = session.run().unwrap();

    assert_eq!(phase, Phase::Lost);
    assert_eq!(session.grid().attempts(), 1);
    drop(session);

    assert_eq!(frontend.notifications(), &[Notification::Loss]);
    assert_eq!(frontend.requests(), 1);
    assert_eq!(frontend.remaining(), 1);
}

/// The same grid after an earlier victory ends in `OverWon`.
#[test]
fn test_jammed_grid_after_victory() {
    let config = packed_config();
    let mut snapshot = Grid::new(config.clone()).unwrap().snapshot();
    snapshot.victory = true;
    let grid = Grid::from_snapshot(config, &snapshot).unwrap();
    let mut frontend = ScriptedFrontend::new([Direction::Left]);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert!(session.victory_announced());
    assert_eq!(session.run().unwrap(), Phase::OverWon);
    drop(session);

    // Victory was announced before this session started
    assert_eq!(frontend.notifications(), &[Notification::OverVictory]);
}

/// Quitting ends the session without touching the grid.
#[test]
fn test_quit() {
    let grid = Grid::new(GridConfig::default()).unwrap();
    let mut frontend =
        ScriptedFrontend::with_choices([Choice::Quit, Choice::Move(Direction::Left)]);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::Quit);
    assert_eq!(session.grid().attempts(), 0);
    drop(session);

    assert_eq!(frontend.notifications(), &[Notification::Quit]);
    assert_eq!(frontend.remaining(), 1);
}

/// Victory and jam in the same move: victory first, then over-victory.
#[test]
fn test_victory_and_jam_same_move() {
    let config = GridConfig::new()
        .with_size(2, 2)
        .with_winning_value(32)
        .with_tiles([((0, 0), 16), ((1, 0), 16), ((0, 1), 4), ((1, 1), 8)]);
    let grid = Grid::new(config).unwrap();
    let mut frontend = ScriptedFrontend::new([Direction::Left]);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::OverWon);
    drop(session);

    assert_eq!(
        frontend.notifications(),
        &[Notification::Victory, Notification::OverVictory]
    );
}

// =============================================================================
// Victory
// =============================================================================

fn near_win() -> Grid {
    let config = GridConfig::new()
        .with_winning_value(32)
        .with_tiles([((0, 0), 16), ((1, 0), 16)]);
    Grid::new(config).unwrap()
}

/// By default victory is announced once and play continues.
#[test]
fn test_victory_continues() {
    let mut frontend = ScriptedFrontend::new([Direction::Left, Direction::Right, Direction::Down]);

    let mut session = Session::new(near_win(), &mut frontend).unwrap();
    assert_eq!(session.step().unwrap(), Phase::AwaitingInput);
    assert!(session.victory_announced());
    assert_eq!(session.run().unwrap(), Phase::Quit);
    drop(session);

    assert_eq!(frontend.count(Notification::Victory), 1);
    assert_eq!(frontend.notifications().last(), Some(&Notification::Quit));
    assert_eq!(frontend.requests(), 4);
}

/// With `stop_on_victory` the session ends in `Won`.
#[test]
fn test_stop_on_victory() {
    let mut frontend = ScriptedFrontend::new([Direction::Left, Direction::Right]);
    let config = SessionConfig::new().stop_on_victory();

    let mut session = Session::with_config(near_win(), &mut frontend, config).unwrap();
    assert_eq!(session.run().unwrap(), Phase::Won);
    assert_eq!(session.grid().largest(), 32);
    drop(session);

    assert_eq!(frontend.notifications(), &[Notification::Victory]);
    assert_eq!(frontend.remaining(), 1);
}

// =============================================================================
// Stepping and Restart
// =============================================================================

/// Stepping a finished session does nothing.
#[test]
fn test_step_after_end() {
    let grid = Grid::new(GridConfig::default()).unwrap();
    let mut frontend = ScriptedFrontend::default();

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.step().unwrap(), Phase::Quit);
    assert_eq!(session.step().unwrap(), Phase::Quit);
    assert_eq!(session.frontend().requests(), 1);
    assert_eq!(session.frontend().count(Notification::Quit), 1);
}

/// Restart replaces the grid and allows another game.
#[test]
fn test_restart() {
    let grid = fixed(4, 4, &[((0, 0), 2), ((1, 0), 2)]);
    let mut frontend = ScriptedFrontend::new([Direction::Left]);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::Quit);
    assert_eq!(session.grid().score(), 4);

    session.restart().unwrap();
    assert_eq!(session.phase(), Phase::AwaitingInput);
    assert_eq!(session.grid().score(), 0);
    assert_eq!(session.grid().attempts(), 0);

    assert_eq!(session.run().unwrap(), Phase::Quit);
    assert_eq!(session.frontend().count(Notification::Quit), 2);
}

/// An empty grid cannot be played.
#[test]
fn test_empty_grid_rejected() {
    let config = GridConfig::default();
    let mut snapshot = Grid::new(config.clone()).unwrap().snapshot();
    snapshot.values = vec![None; 16];
    let grid = Grid::from_snapshot(config, &snapshot).unwrap();
    assert!(grid.is_empty());

    let mut frontend = ScriptedFrontend::default();
    let result = Session::new(grid, &mut frontend);
    assert!(matches!(result, Err(GameError::Configuration(_))));
}

// =============================================================================
// Hooks and Errors
// =============================================================================

#[derive(Default)]
struct Counting {
    script: Vec<Choice>,
    plays: usize,
    attempts: usize,
    choices: Vec<Direction>,
    attempted: Vec<Direction>,
    changes: usize,
    no_changes: usize,
    finished: usize,
    quits: usize,
}

impl Frontend for Counting {
    type Error = GameError;

    fn choose_direction(&mut self) -> Result<Choice, GameError> {
        Ok(if self.script.is_empty() { Choice::Quit } else { self.script.remove(0) })
    }

    fn on_player_quit(&mut self) {
        self.quits += 1;
    }

    fn on_player_victory(&mut self) {}

    fn on_player_overvictory(&mut self) {}

    fn on_player_loss(&mut self) {}

    fn on_play(&mut self, _grid: &Grid) {
        self.plays += 1;
    }

    fn on_attempt(&mut self, _grid: &Grid) {
        self.attempts += 1;
    }

    fn after_choice(&mut self, direction: Direction) {
        self.choices.push(direction);
    }

    fn after_change(&mut self, grid: &Grid, outcome: &MoveOutcome) {
        assert!(outcome.changed);
        assert_eq!(grid.cycles(), self.changes as u64 + 1);
        self.changes += 1;
    }

    fn after_nochange(&mut self, _grid: &Grid, _direction: Direction) {
        self.no_changes += 1;
    }

    fn after_attempt(&mut self, grid: &Grid, direction: Direction) {
        assert_eq!(grid.attempts(), self.attempted.len() as u64 + 1);
        self.attempted.push(direction);
    }

    fn after_play(&mut self, _grid: &Grid) {
        self.finished += 1;
    }
}

/// Every optional hook fires at its point in the cycle.
#[test]
fn test_hooks_fire() {
    let grid = fixed(4, 4, &[((0, 0), 2)]);
    let mut frontend = Counting {
        script: vec![Direction::Left.into(), Direction::Right.into()],
        ..Counting::default()
    };

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::Quit);
    drop(session);

    assert_eq!(frontend.plays, 1);
    // Two moves plus the request that returned quit
    assert_eq!(frontend.attempts, 3);
    assert_eq!(frontend.choices, vec![Direction::Left, Direction::Right]);
    assert_eq!(frontend.attempted, vec![Direction::Left, Direction::Right]);
    assert_eq!(frontend.no_changes, 1);
    assert_eq!(frontend.changes, 1);
    assert_eq!(frontend.finished, 1);
    assert_eq!(frontend.quits, 1);
}

/// Records every callback by name, in order.
#[derive(Default)]
struct EventLog {
    script: Vec<Choice>,
    events: Vec<&'static str>,
}

impl Frontend for EventLog {
    type Error = GameError;

    fn choose_direction(&mut self) -> Result<Choice, GameError> {
        self.events.push("choose");
        Ok(if self.script.is_empty() { Choice::Quit } else { self.script.remove(0) })
    }

    fn on_player_quit(&mut self) {
        self.events.push("quit");
    }

    fn on_player_victory(&mut self) {
        self.events.push("victory");
    }

    fn on_player_overvictory(&mut self) {
        self.events.push("overvictory");
    }

    fn on_player_loss(&mut self) {
        self.events.push("loss");
    }

    fn on_play(&mut self, _grid: &Grid) {
        self.events.push("play");
    }

    fn on_attempt(&mut self, _grid: &Grid) {
        self.events.push("attempt");
    }

    fn after_choice(&mut self, _direction: Direction) {
        self.events.push("choice");
    }

    fn after_change(&mut self, _grid: &Grid, _outcome: &MoveOutcome) {
        self.events.push("change");
    }

    fn after_nochange(&mut self, _grid: &Grid, _direction: Direction) {
        self.events.push("nochange");
    }

    fn after_attempt(&mut self, _grid: &Grid, _direction: Direction) {
        self.events.push("after_attempt");
    }

    fn after_play(&mut self, _grid: &Grid) {
        self.events.push("after_play");
    }
}

/// Hooks run in cycle order; attempt hooks wrap each move and come before
/// any victory or terminal notification.
#[test]
fn test_hook_order() {
    let config = GridConfig::new()
        .with_size(2, 2)
        .with_winning_value(32)
        .with_tiles([((0, 0), 16), ((1, 0), 16), ((0, 1), 4), ((1, 1), 8)]);
    let grid = Grid::new(config).unwrap();
    let mut frontend = EventLog {
        script: vec![Direction::Left.into()],
        ..EventLog::default()
    };

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::OverWon);
    drop(session);

    assert_eq!(
        frontend.events,
        vec![
            "play",
            "attempt",
            "choose",
            "choice",
            "change",
            "after_attempt",
            "victory",
            "after_play",
            "overvictory",
        ]
    );
}

#[derive(Debug, PartialEq)]
enum InputError {
    Disconnected,
    Engine(GameError),
}

impl From<GameError> for InputError {
    fn from(err: GameError) -> Self {
        InputError::Engine(err)
    }
}

struct Broken {
    notified: bool,
}

impl Frontend for Broken {
    type Error = InputError;

    fn choose_direction(&mut self) -> Result<Choice, InputError> {
        Err(InputError::Disconnected)
    }

    fn on_player_quit(&mut self) {
        self.notified = true;
    }

    fn on_player_victory(&mut self) {
        self.notified = true;
    }

    fn on_player_overvictory(&mut self) {
        self.notified = true;
    }

    fn on_player_loss(&mut self) {
        self.notified = true;
    }
}

/// Frontend errors come back unchanged and no notification fires.
#[test]
fn test_frontend_error_propagates() {
    let grid = Grid::new(GridConfig::default()).unwrap();
    let mut frontend = Broken { notified: false };

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run(), Err(InputError::Disconnected));
    assert_eq!(session.phase(), Phase::AwaitingInput);
    drop(session);

    assert!(!frontend.notified);
}

/// Fails on its first request, then replays a script.
struct FailsOnce {
    failed: bool,
    script: Vec<Choice>,
}

impl Frontend for FailsOnce {
    type Error = InputError;

    fn choose_direction(&mut self) -> Result<Choice, InputError> {
        if !self.failed {
            self.failed = true;
            return Err(InputError::Disconnected);
        }
        Ok(if self.script.is_empty() { Choice::Quit } else { self.script.remove(0) })
    }

    fn on_player_quit(&mut self) {}

    fn on_player_victory(&mut self) {}

    fn on_player_overvictory(&mut self) {}

    fn on_player_loss(&mut self) {}
}

/// A failed step leaves the session awaiting input and able to continue.
#[test]
fn test_step_after_error_resumes() {
    let grid = fixed(4, 4, &[((0, 0), 2), ((1, 0), 2)]);
    let mut frontend = FailsOnce {
        failed: false,
        script: vec![Direction::Left.into()],
    };

    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.step(), Err(InputError::Disconnected));
    assert_eq!(session.phase(), Phase::AwaitingInput);
    assert_eq!(session.grid().attempts(), 0);

    assert_eq!(session.step(), Ok(Phase::AwaitingInput));
    assert_eq!(session.grid().score(), 4);
    assert_eq!(session.step(), Ok(Phase::Quit));
}

// =============================================================================
// Bundled Frontends
// =============================================================================

/// A random player on a small grid plays until the end.
#[test]
fn test_random_frontend_plays_out() {
    let config = GridConfig::default().with_size(2, 2).with_seed(11);
    let grid = Grid::new(config).unwrap();
    let mut frontend = RandomFrontend::new(11).with_max_moves(10_000);

    let mut session = Session::new(grid, &mut frontend).unwrap();
    let phase = session.run().unwrap();
    assert!(phase.is_terminal());
    drop(session);

    assert_eq!(frontend.notifications().len(), 1);
    match phase {
        Phase::Lost => assert_eq!(frontend.notifications(), &[Notification::Loss]),
        Phase::Quit => assert_eq!(frontend.moves(), 10_000),
        other => panic!("unexpected phase {other:?}"),
    }
}

/// Choices can come from another thread.
#[test]
fn test_channel_frontend_across_threads() {
    let (choices, notifications, mut frontend) = ChannelFrontend::pair();

    let player = thread::spawn(move || {
        for direction in [Direction::Left, Direction::Up, Direction::Right] {
            choices.send(direction.into()).unwrap();
        }
        choices.send(Choice::Quit).unwrap();
    });

    let grid = Grid::new(GridConfig::default()).unwrap();
    let mut session = Session::new(grid, &mut frontend).unwrap();
    assert_eq!(session.run().unwrap(), Phase::Quit);
    assert_eq!(session.grid().attempts(), 3);
    player.join().unwrap();

    assert_eq!(notifications.recv().unwrap(), Notification::Quit);
    assert!(notifications.try_recv().is_err());
}

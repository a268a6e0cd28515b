//! Console 2048.
//!
//! Reads one command per line from stdin (`w/a/s/d`, `h/j/k/l` or a
//! direction name, `q` to quit) and redraws the grid after every change.
//! With `--random` the moves are chosen by a seeded random player instead.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use rust_2048::{
    Choice, Direction, Frontend, GameError, Grid, GridConfig, MoveOutcome, Phase, RandomFrontend,
    Session, SessionConfig, Value,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rust-2048", version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Number of columns
    #[arg(long, default_value_t = 4)]
    width: usize,
    /// Number of rows
    #[arg(long, default_value_t = 4)]
    height: usize,
    /// Tile value that wins the game
    #[arg(long, value_name = "VALUE", default_value_t = 2048)]
    goal: Value,
    /// Value of newly spawned tiles
    #[arg(long, value_name = "VALUE", default_value_t = 2)]
    unit: Value,
    /// RNG seed for tile placement
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Let a random player make the moves
    #[arg(long)]
    random: bool,
    /// Quit the random player after this many moves
    #[arg(long, value_name = "N", requires = "random")]
    max_moves: Option<u64>,
    /// End the game as soon as the goal is reached
    #[arg(long)]
    stop_on_victory: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Disable logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn grid_config(&self) -> GridConfig {
        GridConfig::new()
            .with_size(self.width, self.height)
            .with_unit_value(self.unit)
            .with_winning_value(self.goal)
            .with_seed(self.seed)
    }

    fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::new();
        if self.stop_on_victory {
            config.stop_on_victory()
        } else {
            config
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ConsoleError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Frontend over stdin/stdout.
struct ConsoleFrontend<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleFrontend<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            error!(%err, "failed to write to terminal");
        }
    }

    fn draw(&mut self, grid: &Grid) {
        let text = format!("\n{grid}score: {}  moves: {}", grid.score(), grid.cycles());
        self.say(&text);
    }
}

impl<R: BufRead, W: Write> Frontend for ConsoleFrontend<R, W> {
    type Error = ConsoleError;

    fn choose_direction(&mut self) -> Result<Choice, ConsoleError> {
        loop {
            write!(self.output, "move [wasd/hjkl/q]> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Choice::Quit);
            }
            let command = line.trim();
            match command {
                "" => continue,
                "q" | "quit" | "exit" => return Ok(Choice::Quit),
                _ => match command.parse::<Direction>() {
                    Ok(direction) => return Ok(Choice::Move(direction)),
                    Err(err) => self.say(&err.to_string()),
                },
            }
        }
    }

    fn on_player_quit(&mut self) {
        self.say("Bye.");
    }

    fn on_player_victory(&mut self) {
        self.say("You reached the goal! Keep going or press q to quit.");
    }

    fn on_player_overvictory(&mut self) {
        self.say("No moves left. You won this one.");
    }

    fn on_player_loss(&mut self) {
        self.say("No moves left. Game over.");
    }

    fn on_play(&mut self, grid: &Grid) {
        self.draw(grid);
    }

    fn after_change(&mut self, grid: &Grid, _outcome: &MoveOutcome) {
        self.draw(grid);
    }

    fn after_nochange(&mut self, _grid: &Grid, direction: Direction) {
        self.say(&format!("Nothing moves {direction}."));
    }
}

fn init_logging(cli: &Cli) {
    if cli.quiet {
        return;
    }
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn play(cli: &Cli) -> Result<(Phase, Grid), ConsoleError> {
    let grid = Grid::new(cli.grid_config())?;

    if cli.random {
        let mut frontend = RandomFrontend::new(cli.seed.wrapping_add(1));
        if let Some(max) = cli.max_moves {
            frontend = frontend.with_max_moves(max);
        }
        let mut session = Session::with_config(grid, &mut frontend, cli.session_config())?;
        let phase = session.run()?;
        return Ok((phase, session.into_grid()));
    }

    let stdin = io::stdin();
    let mut frontend = ConsoleFrontend::new(stdin.lock(), io::stdout());
    let mut session = Session::with_config(grid, &mut frontend, cli.session_config())?;
    let phase = session.run()?;
    Ok((phase, session.into_grid()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match play(&cli) {
        Ok((phase, grid)) => {
            info!(?phase, score = grid.score(), "game over");
            println!(
                "\n{grid}final score: {}  largest tile: {}  ({phase:?})",
                grid.score(),
                grid.largest()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> ConsoleFrontend<&[u8], Vec<u8>> {
        ConsoleFrontend::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_parses_commands() {
        let mut frontend = console("w\n\nbogus\nh\nq\n");
        assert!(matches!(frontend.choose_direction(), Ok(Choice::Move(Direction::Up))));
        assert!(matches!(frontend.choose_direction(), Ok(Choice::Move(Direction::Left))));
        assert!(matches!(frontend.choose_direction(), Ok(Choice::Quit)));
        let shown = String::from_utf8(frontend.output).unwrap();
        assert!(shown.contains("bogus"));
    }

    #[test]
    fn test_eof_quits() {
        let mut frontend = console("");
        assert!(matches!(frontend.choose_direction(), Ok(Choice::Quit)));
    }

    #[test]
    fn test_cli_configs() {
        let cli = Cli::parse_from([
            "rust-2048",
            "--width",
            "5",
            "--goal",
            "64",
            "--stop-on-victory",
        ]);
        let config = cli.grid_config();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 4);
        assert_eq!(config.winning_value, 64);
        assert!(cli.session_config().stop_on_victory);
    }

    #[test]
    fn test_random_play_finishes() {
        let cli = Cli::parse_from(["rust-2048", "--random", "--max-moves", "20", "--goal", "16"]);
        let (phase, grid) = play(&cli).unwrap();
        assert!(phase.is_terminal());
        assert!(grid.attempts() <= 20);
    }
}

//! Sliding-Tile Puzzle Solver
//!
//! Solves the 3x3 sliding-tile puzzle with a chosen search strategy and
//! prints every step of the solution. Without an explicit grid, a random
//! solvable one is generated.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use slidetile::grid::{self, format_grid};
use slidetile::solver::{SearchConfig, SearchEngine, SearchOutcome, DEFAULT_MAX_DEPTH};
use slidetile::state::PuzzleState;
use slidetile::strategy::StrategyKind;
use slidetile::{PuzzleError, Result};

/// Give up drawing random grids after this many unsolvable ones.
const MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Solves the 3x3 sliding-tile puzzle.
#[derive(Parser)]
#[command(name = "slidetile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a move sequence that reaches the goal.
    Solve(SolveArgs),
    /// Print the heuristic score of a grid.
    Score {
        /// Nine tiles row by row, 0 for the blank, e.g. "1,2,3,4,0,5,7,8,6".
        #[arg(short, long)]
        grid: String,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Search strategy (menu numbers 1, 2, 3 also work).
    #[arg(short, long, value_enum, default_value_t = StrategyKind::BreadthFirst)]
    strategy: StrategyKind,

    /// Nine tiles row by row, 0 for the blank. Random when omitted.
    #[arg(short, long)]
    grid: Option<String>,

    /// Seed for the random grid.
    #[arg(long)]
    seed: Option<u64>,

    /// Deepest move count that is still expanded.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::BreadthFirst,
            grid: None,
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Score { grid }) => run_score(&grid),
        // default: solve a random grid breadth-first
        None => run_solve(&SolveArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr log subscriber; `RUST_LOG` overrides the default level.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slidetile=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the initial state, runs the search and prints the outcome.
fn run_solve(args: &SolveArgs) -> Result<()> {
    let initial = initial_state(args)?;
    println!("Initial grid:\n{}", initial);

    let engine = SearchEngine::new(SearchConfig::with_max_depth(args.max_depth));
    let outcome = args.strategy.search(&engine, initial);
    print!("{}", format_outcome(&outcome));

    Ok(())
}

/// Parses the grid argument, or draws a random solvable grid.
///
/// Explicit grids with odd parity are refused: the search would run until
/// the depth cap without ever reaching the goal.
fn initial_state(args: &SolveArgs) -> Result<PuzzleState> {
    let state = match &args.grid {
        Some(text) => PuzzleState::from_grid(grid::parse_grid(text)?)?,
        None => random_solvable(args.seed)?,
    };

    if !state.is_solvable() {
        return Err(PuzzleError::Unsolvable);
    }

    Ok(state)
}

fn random_solvable(seed: Option<u64>) -> Result<PuzzleState> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let state = PuzzleState::random_with(&mut rng);
        if state.is_solvable() {
            return Ok(state);
        }
        warn!(grid = ?state.grid(), "discarding unsolvable random grid");
    }

    Err(PuzzleError::Unsolvable)
}

/// Prints the heuristic score of a grid.
fn run_score(text: &str) -> Result<()> {
    let mut state = PuzzleState::from_grid(grid::parse_grid(text)?)?;
    let score = state.evaluate_heuristic();
    print!("{}", format_grid(state.grid()));
    println!("Score: {:.2} / 9.00", score);
    Ok(())
}

/// Formats the solution steps and search counters.
fn format_outcome(outcome: &SearchOutcome) -> String {
    let stats = &outcome.stats;
    let mut output = String::new();

    if outcome.is_found() {
        output.push_str(&format!(
            "Solution found in {} moves:\n\n",
            outcome.path.move_count()
        ));
        output.push_str(&outcome.path.to_string());
        output.push('\n');
    } else {
        output.push_str("No solution found within the depth cap\n");
    }

    output.push_str(&format!(
        "Generated {} states, expanded {}\n",
        stats.generated, stats.expanded
    ));
    output
}

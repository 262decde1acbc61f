//! Sliding-Tile Puzzle Solver Library
//!
//! Searches for blank-tile move sequences that turn a shuffled 3x3 grid into
//! the goal configuration, using breadth-first, depth-first or greedy
//! best-first traversal.

pub mod direction;
pub mod error;
pub mod grid;
pub mod moves;
pub mod path;
pub mod solver;
pub mod state;
pub mod strategy;

use grid::Grid;
use solver::{SearchConfig, SearchEngine, SearchOutcome};
use state::PuzzleState;
use strategy::StrategyKind;

pub use error::{PuzzleError, Result};

/// Validates `grid` and searches it with the default depth cap.
pub fn solve(grid: Grid, kind: StrategyKind) -> Result<SearchOutcome> {
    solve_with(grid, kind, SearchConfig::default())
}

/// Validates `grid` and searches it with an explicit configuration.
///
/// A malformed grid is rejected before any search work begins.
pub fn solve_with(
    grid: Grid,
    kind: StrategyKind,
    config: SearchConfig,
) -> Result<SearchOutcome> {
    let initial = PuzzleState::from_grid(grid)?;
    Ok(kind.search(&SearchEngine::new(config), initial))
}

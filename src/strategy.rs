//! Frontier policies for the search engine.
//!
//! A strategy decides which end of the frontier a new state enters, and may
//! reorder the states generated by one expansion before they enter it.

use std::collections::VecDeque;
use std::fmt;

use clap::ValueEnum;

use crate::solver::{SearchEngine, SearchOutcome};
use crate::state::PuzzleState;

/// States waiting to be expanded.
pub type Frontier = VecDeque<PuzzleState>;

/// Policy controlling frontier insertion order.
pub trait Strategy {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Takes the next state to expand.
    fn pop(&mut self, frontier: &mut Frontier) -> Option<PuzzleState> {
        frontier.pop_front()
    }

    /// Receives a freshly generated child that is within the depth cap.
    fn offer(&mut self, frontier: &mut Frontier, child: PuzzleState);

    /// Runs once after every direction of the current state was tried.
    fn after_expansion(&mut self, _frontier: &mut Frontier) {}
}

/// Level-order traversal: the first goal found has the fewest moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl Strategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn offer(&mut self, frontier: &mut Frontier, child: PuzzleState) {
        frontier.push_back(child);
    }
}

/// Follows the newest child until the depth cap, then backtracks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl Strategy for DepthFirst {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn offer(&mut self, frontier: &mut Frontier, child: PuzzleState) {
        frontier.push_front(child);
    }
}

/// Greedy reordering of each sibling set by heuristic score.
///
/// Children are buffered during an expansion. Afterwards they are scored,
/// sorted ascending, and pushed one at a time onto the head of the frontier,
/// which leaves the highest-scoring sibling at the head. Equal scores keep
/// generation order in the sort, so the later sibling ends nearer the head.
/// No path cost is accumulated, so this is not A*.
#[derive(Debug, Default, Clone)]
pub struct BestFirstHeuristic {
    siblings: Vec<PuzzleState>,
}

impl BestFirstHeuristic {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for BestFirstHeuristic {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn offer(&mut self, _frontier: &mut Frontier, child: PuzzleState) {
        self.siblings.push(child);
    }

    fn after_expansion(&mut self, frontier: &mut Frontier) {
        let mut scored: Vec<(f64, PuzzleState)> = self
            .siblings
            .drain(..)
            .map(|mut sibling| (sibling.evaluate_heuristic(), sibling))
            .collect();

        // stable, so equal scores keep generation order
        scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        for (_, sibling) in scored {
            frontier.push_front(sibling);
        }
    }
}

/// Selectable strategy variants.
///
/// The menu numbers 1, 2 and 3 are accepted as aliases on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    #[value(name = "breadth-first", aliases = ["1", "bfs"])]
    BreadthFirst,
    #[value(name = "depth-first", aliases = ["2", "dfs"])]
    DepthFirst,
    #[value(name = "best-first", alias = "3")]
    BestFirstHeuristic,
}

impl StrategyKind {
    /// Maps a menu option (1, 2 or 3) to a strategy.
    pub fn from_menu_option(option: u32) -> Option<Self> {
        match option {
            1 => Some(StrategyKind::BreadthFirst),
            2 => Some(StrategyKind::DepthFirst),
            3 => Some(StrategyKind::BestFirstHeuristic),
            _ => None,
        }
    }

    /// Runs `engine` from `initial` with a fresh strategy of this kind.
    pub fn search(self, engine: &SearchEngine, initial: PuzzleState) -> SearchOutcome {
        match self {
            StrategyKind::BreadthFirst => engine.execute_search(initial, &mut BreadthFirst),
            StrategyKind::DepthFirst => engine.execute_search(initial, &mut DepthFirst),
            StrategyKind::BestFirstHeuristic => {
                engine.execute_search(initial, &mut BestFirstHeuristic::new())
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::BreadthFirst => "breadth-first",
            StrategyKind::DepthFirst => "depth-first",
            StrategyKind::BestFirstHeuristic => "best-first",
        };
        write!(f, "{}", name)
    }
}

//! Frontier-driven tree search over puzzle states.
//!
//! One engine runs any [`Strategy`]. Each run:
//! - numbers states sequentially and links every child to its parent
//! - keeps every generated state in a per-depth registry until it returns
//! - enqueues children only up to the depth cap; deeper ones are recorded
//!   and goal-checked but never expanded
//! - stops at the first generated goal (no search for a shorter one)
//!
//! Only immediate move reversal is blocked, so the same grid can appear at
//! several places in the tree.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::{debug, error, info, trace};

use crate::direction::Direction;
use crate::moves::move_to;
use crate::path::{self, SolutionPath};
use crate::state::{PuzzleState, StateId};
use crate::strategy::{Frontier, Strategy};

/// Deepest move count a state may have and still be expanded.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Id given to the initial state of every run.
const INITIAL_STATE_ID: StateId = 1;

/// Limits injected into a search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Children with a larger move count are recorded but never enqueued.
    pub max_depth: usize,
}

impl SearchConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A goal state was generated.
    Found,
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

/// Counters gathered during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States created, including the initial one.
    pub generated: u64,
    /// States popped from the frontier and expanded.
    pub expanded: u64,
    pub elapsed: Duration,
}

/// Result of [`SearchEngine::execute_search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Depth-indexed solution; empty when the search was exhausted.
    pub path: SolutionPath,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

/// Every state generated in a run, grouped by move count.
#[derive(Debug, Default)]
pub(crate) struct DepthRegistry {
    levels: FxHashMap<usize, Vec<PuzzleState>>,
}

impl DepthRegistry {
    pub(crate) fn record(&mut self, state: &PuzzleState) {
        self.levels
            .entry(state.move_count())
            .or_default()
            .push(*state);
    }

    /// States generated at `depth`, in generation order.
    pub(crate) fn at_depth(&self, depth: usize) -> &[PuzzleState] {
        self.levels.get(&depth).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn depth_count(&self) -> usize {
        self.levels.len()
    }
}

/// Runs searches with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Searches from `initial` until a goal is generated or the frontier is
    /// empty.
    ///
    /// If `initial` already is the goal the run finishes immediately with a
    /// zero-move path. Frontier and registry live only for this call.
    pub fn execute_search<S: Strategy + ?Sized>(
        &self,
        initial: PuzzleState,
        strategy: &mut S,
    ) -> SearchOutcome {
        let started = Instant::now();
        info!(
            event = "search_start",
            strategy = strategy.name(),
            max_depth = self.config.max_depth,
        );

        let mut run = SearchRun::new(self.config);
        let termination = run.run(initial, strategy);

        let (status, path) = match termination {
            Termination::Found(goal) => match path::reconstruct(&run.registry, &goal) {
                Some(path) => (SearchStatus::Found, path),
                None => {
                    error!(goal_id = goal.id(), "goal lineage is missing from the registry");
                    (SearchStatus::Exhausted, SolutionPath::default())
                }
            },
            Termination::Exhausted => (SearchStatus::Exhausted, SolutionPath::default()),
        };

        let stats = SearchStats {
            generated: run.generated,
            expanded: run.expanded,
            elapsed: started.elapsed(),
        };

        let found = status == SearchStatus::Found;
        debug!(depths = run.registry.depth_count(), "registry released");
        info!(
            event = "search_end",
            strategy = strategy.name(),
            found,
            moves = path.move_count(),
            generated = stats.generated,
            expanded = stats.expanded,
            elapsed_ms = stats.elapsed.as_millis() as u64,
        );

        SearchOutcome {
            status,
            path,
            stats,
        }
    }
}

/// Terminal phase of a run.
enum Termination {
    Found(PuzzleState),
    Exhausted,
}

/// Mutable state owned by one `execute_search` call.
struct SearchRun {
    config: SearchConfig,
    frontier: Frontier,
    registry: DepthRegistry,
    last_id: StateId,
    generated: u64,
    expanded: u64,
}

impl SearchRun {
    fn new(config: SearchConfig) -> Self {
        Self {
            config,
            frontier: Frontier::new(),
            registry: DepthRegistry::default(),
            last_id: 0,
            generated: 0,
            expanded: 0,
        }
    }

    fn run<S: Strategy + ?Sized>(
        &mut self,
        mut initial: PuzzleState,
        strategy: &mut S,
    ) -> Termination {
        self.last_id = INITIAL_STATE_ID;
        initial.assign_lineage(INITIAL_STATE_ID, None);
        self.registry.record(&initial);
        self.generated += 1;

        if initial.is_goal() {
            return Termination::Found(initial);
        }

        self.frontier.push_front(initial);

        while let Some(current) = strategy.pop(&mut self.frontier) {
            self.expanded += 1;
            trace!(
                id = current.id(),
                depth = current.move_count(),
                frontier = self.frontier.len(),
                "expanding"
            );

            let found = self.expand(&current, strategy);
            strategy.after_expansion(&mut self.frontier);

            if let Some(goal) = found {
                return Termination::Found(goal);
            }
        }

        Termination::Exhausted
    }

    /// Generates the children of `current` and hands them to the strategy.
    ///
    /// Returns the first child that matches the goal; the remaining
    /// directions are not tried.
    fn expand<S: Strategy + ?Sized>(
        &mut self,
        current: &PuzzleState,
        strategy: &mut S,
    ) -> Option<PuzzleState> {
        for direction in Direction::ALL {
            let Some(mut child) = move_to(direction, current) else {
                continue;
            };

            self.last_id += 1;
            child.assign_lineage(self.last_id, Some(current.id()));
            self.registry.record(&child);
            self.generated += 1;

            if child.move_count() <= self.config.max_depth {
                strategy.offer(&mut self.frontier, child);
            }

            if child.is_goal() {
                return Some(child);
            }
        }

        None
    }
}

//! Solution path reconstruction.

use std::fmt;

use crate::direction::Direction;
use crate::solver::DepthRegistry;
use crate::state::PuzzleState;

/// The states from the initial grid to the goal, indexed by depth.
///
/// Index `d` holds the state reached after `d` moves. An empty path means
/// no solution was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPath {
    steps: Vec<PuzzleState>,
}

impl SolutionPath {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of moves in the solution (one less than the number of states).
    pub fn move_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The state at `depth`, if the path reaches it.
    pub fn get(&self, depth: usize) -> Option<&PuzzleState> {
        self.steps.get(depth)
    }

    pub fn states(&self) -> &[PuzzleState] {
        &self.steps
    }

    /// The directions that lead from the initial state to the goal.
    pub fn moves(&self) -> Vec<Direction> {
        self.steps.iter().filter_map(PuzzleState::last_move).collect()
    }

    /// Iterates `(depth, state)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PuzzleState)> {
        self.steps.iter().enumerate()
    }
}

impl fmt::Display for SolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, state) in self.iter() {
            if depth > 0 {
                writeln!(f)?;
            }
            match state.last_move() {
                Some(direction) => writeln!(f, "Depth {} ({})", depth, direction)?,
                None => writeln!(f, "Depth {} (start)", depth)?,
            }
            write!(f, "{}", state)?;
        }
        Ok(())
    }
}

/// Walks parent links from `goal` back to depth 0.
///
/// Each step scans the registry one level up for the state whose id is the
/// current parent id. Returns `None` if a link is missing.
pub(crate) fn reconstruct(
    registry: &DepthRegistry,
    goal: &PuzzleState,
) -> Option<SolutionPath> {
    let mut steps = Vec::with_capacity(goal.move_count() + 1);
    steps.push(*goal);

    let mut current = *goal;
    for depth in (0..goal.move_count()).rev() {
        let parent_id = current.parent_id()?;
        let parent = registry
            .at_depth(depth)
            .iter()
            .find(|candidate| candidate.id() == parent_id)?;
        steps.push(*parent);
        current = *parent;
    }

    steps.reverse();
    Some(SolutionPath { steps })
}

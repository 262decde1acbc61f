//! Puzzle state snapshots.
//!
//! A `PuzzleState` is one node of the search tree: a grid, the cached blank
//! position, its lineage within the current search run, and an optional
//! heuristic score.

use std::fmt;

use rand::Rng;

use crate::direction::Direction;
use crate::error::Result;
use crate::grid::{self, Coord, Grid, BLANK, CELL_COUNT, DIM, GOAL};

/// Sequential identifier of a state within one search run.
pub type StateId = u64;

/// Score for a cell that already holds its goal value.
const EXACT_MATCH_SCORE: f64 = 1.0;
/// Score for a cell whose goal value sits in an orthogonal neighbour.
const ADJACENT_MATCH_SCORE: f64 = 0.5;
/// Score for a cell whose goal value sits in a diagonal neighbour.
const DIAGONAL_MATCH_SCORE: f64 = 0.25;

const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_OFFSETS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A snapshot of the puzzle at one point in the search.
///
/// Fields are fixed once the search engine has assigned lineage; only the
/// score cache is filled in later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleState {
    grid: Grid,
    /// Invariant: `grid[blank.0][blank.1] == BLANK`.
    blank: Coord,
    id: StateId,
    parent_id: Option<StateId>,
    move_count: usize,
    last_move: Option<Direction>,
    score: Option<f64>,
}

impl PuzzleState {
    /// Builds a state from an explicit grid.
    ///
    /// Fails if the grid is not a permutation of `0..=8`.
    pub fn from_grid(grid: Grid) -> Result<Self> {
        let blank = grid::validate(&grid)?;
        Ok(Self::with_blank(grid, blank))
    }

    /// The solved configuration as a state.
    pub fn goal() -> Self {
        Self::with_blank(GOAL, (DIM - 1, DIM - 1))
    }

    /// Builds a random grid using the thread-local generator.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Builds a random grid by rejection sampling.
    ///
    /// Each cell draws values until it finds one not used yet. Roughly half
    /// of the results are unsolvable; see [`PuzzleState::is_solvable`].
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut used = [false; CELL_COUNT];
        let mut grid = [[BLANK; DIM]; DIM];
        let mut blank = (0, 0);

        for (row, column) in grid::coords() {
            let mut value = rng.gen_range(0..CELL_COUNT);
            while used[value] {
                value = rng.gen_range(0..CELL_COUNT);
            }
            used[value] = true;
            grid[row][column] = value as u8;
            if value == BLANK as usize {
                blank = (row, column);
            }
        }

        Self::with_blank(grid, blank)
    }

    /// Copies grid, blank position and move count from another state.
    ///
    /// Lineage, last move and score start empty.
    pub fn copied_from(other: &PuzzleState) -> Self {
        Self {
            move_count: other.move_count,
            ..Self::with_blank(other.grid, other.blank)
        }
    }

    fn with_blank(grid: Grid, blank: Coord) -> Self {
        Self {
            grid,
            blank,
            id: 0,
            parent_id: None,
            move_count: 0,
            last_move: None,
            score: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn blank_position(&self) -> Coord {
        self.blank
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn parent_id(&self) -> Option<StateId> {
        self.parent_id
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// The cached heuristic score, if it has been evaluated.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn is_goal(&self) -> bool {
        self.grid == GOAL
    }

    /// Whether the goal is reachable at all.
    ///
    /// On an odd-width board every move preserves inversion parity, and the
    /// goal has zero inversions.
    pub fn is_solvable(&self) -> bool {
        grid::inversions(&self.grid) % 2 == 0
    }

    pub fn is_blank_at_top_edge(&self) -> bool {
        self.blank.0 == 0
    }

    pub fn is_blank_at_bottom_edge(&self) -> bool {
        self.blank.0 == DIM - 1
    }

    pub fn is_blank_at_left_edge(&self) -> bool {
        self.blank.1 == 0
    }

    pub fn is_blank_at_right_edge(&self) -> bool {
        self.blank.1 == DIM - 1
    }

    /// Scores how close the grid is to the goal, from 0.0 to 9.0.
    ///
    /// Each cell contributes the first of: 1.0 if it holds its goal value,
    /// 0.5 if an orthogonal neighbour does, 0.25 if a diagonal neighbour
    /// does, otherwise nothing.
    pub fn heuristic(&self) -> f64 {
        grid::coords()
            .map(|coord| self.cell_score(coord))
            .sum()
    }

    /// Computes the heuristic and caches it in the state.
    pub fn evaluate_heuristic(&mut self) -> f64 {
        let score = self.heuristic();
        self.score = Some(score);
        score
    }

    fn cell_score(&self, (row, column): Coord) -> f64 {
        let wanted = GOAL[row][column];

        if self.grid[row][column] == wanted {
            EXACT_MATCH_SCORE
        } else if self.neighbour_holds((row, column), &ORTHOGONAL_OFFSETS, wanted) {
            ADJACENT_MATCH_SCORE
        } else if self.neighbour_holds((row, column), &DIAGONAL_OFFSETS, wanted) {
            DIAGONAL_MATCH_SCORE
        } else {
            0.0
        }
    }

    fn neighbour_holds(
        &self,
        (row, column): Coord,
        offsets: &[(isize, isize)],
        value: u8,
    ) -> bool {
        offsets.iter().any(|&(row_delta, column_delta)| {
            match (
                row.checked_add_signed(row_delta),
                column.checked_add_signed(column_delta),
            ) {
                (Some(r), Some(c)) if r < DIM && c < DIM => self.grid[r][c] == value,
                _ => false,
            }
        })
    }

    /// Applies a blank move that the caller has already checked is legal.
    pub(crate) fn slide_blank(&mut self, direction: Direction, to: Coord) {
        let (old_row, old_column) = self.blank;
        let (new_row, new_column) = to;

        self.grid[old_row][old_column] = self.grid[new_row][new_column];
        self.grid[new_row][new_column] = BLANK;
        self.blank = to;
        self.move_count += 1;
        self.last_move = Some(direction);
    }

    /// Records where this state sits in the search tree.
    pub(crate) fn assign_lineage(&mut self, id: StateId, parent_id: Option<StateId>) {
        self.id = id;
        self.parent_id = parent_id;
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", grid::format_grid(&self.grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Two moves from the goal: the blank went Up then Left.
    const TWO_AWAY: Grid = [[1, 2, 3], [4, 0, 5], [7, 8, 6]];

    fn assert_permutation(grid: &Grid) {
        assert!(grid::validate(grid).is_ok(), "not a permutation: {grid:?}");
    }

    #[test]
    fn test_from_grid_locates_blank() {
        let state = PuzzleState::from_grid(TWO_AWAY).unwrap();
        assert_eq!(state.blank_position(), (1, 1));
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.last_move(), None);
        assert_eq!(state.parent_id(), None);
        assert_eq!(state.score(), None);
    }

    #[test]
    fn test_from_grid_rejects_malformed_grid() {
        let result = PuzzleState::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 42]]);
        assert_eq!(
            result,
            Err(PuzzleError::TileOutOfRange {
                value: 42,
                row: 2,
                column: 2
            })
        );
    }

    #[test]
    fn test_random_grids_are_permutations() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let state = PuzzleState::random_with(&mut rng);
            assert_permutation(state.grid());
            let (row, column) = state.blank_position();
            assert_eq!(state.grid()[row][column], BLANK);
        }
    }

    #[test]
    fn test_random_is_deterministic_for_a_seed() {
        let first = PuzzleState::random_with(&mut StdRng::seed_from_u64(5));
        let second = PuzzleState::random_with(&mut StdRng::seed_from_u64(5));
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn test_copy_is_independent_of_original() {
        let original = PuzzleState::from_grid(TWO_AWAY).unwrap();
        let mut copy = PuzzleState::copied_from(&original);
        copy.slide_blank(Direction::Right, (1, 2));

        assert_eq!(original.grid(), &TWO_AWAY);
        assert_ne!(copy.grid(), original.grid());
    }

    #[test]
    fn test_copy_keeps_move_count_but_not_lineage() {
        let mut original = PuzzleState::from_grid(TWO_AWAY).unwrap();
        original.slide_blank(Direction::Up, (0, 1));
        original.assign_lineage(7, Some(3));
        original.evaluate_heuristic();

        let copy = PuzzleState::copied_from(&original);
        assert_eq!(copy.move_count(), 1);
        assert_eq!(copy.blank_position(), (0, 1));
        assert_eq!(copy.id(), 0);
        assert_eq!(copy.parent_id(), None);
        assert_eq!(copy.last_move(), None);
        assert_eq!(copy.score(), None);
    }

    #[test]
    fn test_goal_scores_nine() {
        let mut goal = PuzzleState::goal();
        assert_eq!(goal.evaluate_heuristic(), 9.0);
        assert!(goal.is_goal());
    }

    #[test]
    fn test_heuristic_partial_credit() {
        // six exact cells, two adjacent (5 and 6), one diagonal (the blank)
        let state = PuzzleState::from_grid(TWO_AWAY).unwrap();
        assert_eq!(state.heuristic(), 7.25);

        // one move away: seven exact cells, 6 and the blank adjacent
        let state = PuzzleState::from_grid([[1, 2, 3], [4, 5, 0], [7, 8, 6]]).unwrap();
        assert_eq!(state.heuristic(), 8.0);
    }

    #[test]
    fn test_reversed_grid_scores_only_the_centre() {
        let state = PuzzleState::from_grid([[0, 8, 7], [6, 5, 4], [3, 2, 1]]).unwrap();
        assert_eq!(state.heuristic(), 1.0);
    }

    #[test]
    fn test_heuristic_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let score = PuzzleState::random_with(&mut rng).heuristic();
            assert!((0.0..=9.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_evaluate_heuristic_is_idempotent() {
        let mut state = PuzzleState::from_grid(TWO_AWAY).unwrap();
        let first = state.evaluate_heuristic();
        let second = state.evaluate_heuristic();
        assert_eq!(first, second);
        assert_eq!(state.score(), Some(first));
    }

    #[test]
    fn test_edge_queries() {
        let corner = PuzzleState::from_grid([[0, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap();
        assert!(corner.is_blank_at_top_edge());
        assert!(corner.is_blank_at_left_edge());
        assert!(!corner.is_blank_at_bottom_edge());
        assert!(!corner.is_blank_at_right_edge());

        let goal = PuzzleState::goal();
        assert!(goal.is_blank_at_bottom_edge());
        assert!(goal.is_blank_at_right_edge());
        assert!(!goal.is_blank_at_top_edge());
        assert!(!goal.is_blank_at_left_edge());
    }

    #[test]
    fn test_solvability_parity() {
        assert!(PuzzleState::goal().is_solvable());
        assert!(PuzzleState::from_grid(TWO_AWAY).unwrap().is_solvable());
        let swapped = PuzzleState::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        assert!(!swapped.is_solvable());
    }
}

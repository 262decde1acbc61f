//! Move legality and application.

use crate::direction::Direction;
use crate::state::PuzzleState;

/// Whether the blank can move in `direction` from `state`.
///
/// A move is illegal if it would push the blank off the grid, or if it
/// would immediately undo the move that produced `state`. Longer cycles are
/// not detected.
pub fn can_move(state: &PuzzleState, direction: Direction) -> bool {
    let at_edge = match direction {
        Direction::Up => state.is_blank_at_top_edge(),
        Direction::Down => state.is_blank_at_bottom_edge(),
        Direction::Left => state.is_blank_at_left_edge(),
        Direction::Right => state.is_blank_at_right_edge(),
    };

    !at_edge && state.last_move() != Some(direction.opposite())
}

/// Produces the state reached by moving the blank in `direction`.
///
/// Returns `None` when the move is illegal; that is a pruned branch rather
/// than an error. The child has no lineage until the search assigns one.
pub fn move_to(direction: Direction, state: &PuzzleState) -> Option<PuzzleState> {
    if !can_move(state, direction) {
        return None;
    }

    let target = direction.step(state.blank_position())?;
    let mut child = PuzzleState::copied_from(state);
    child.slide_blank(direction, target);
    Some(child)
}

//! Blank-tile move directions.
//!
//! A direction names where the blank travels, so `Up` slides the tile above
//! the blank down into it.

use std::fmt;

use crate::grid::{Coord, DIM};

/// One of the four cardinal moves of the blank tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// All directions, in the order the search expands them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// The `(row_delta, column_delta)` applied to the blank position.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// The move that undoes this one.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Shifts a coordinate by this direction's delta.
    ///
    /// Returns `None` if the result would leave the grid.
    pub fn step(self, (row, column): Coord) -> Option<Coord> {
        let (row_delta, column_delta) = self.delta();
        let new_row = row.checked_add_signed(row_delta)?;
        let new_column = column.checked_add_signed(column_delta)?;

        (new_row < DIM && new_column < DIM).then_some((new_row, new_column))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Down => "Down",
        };
        write!(f, "{}", name)
    }
}

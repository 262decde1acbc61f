//! Error types for grid construction and parsing.

use thiserror::Error;

/// Precondition violations detected before any search work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// A cell holds a value outside `0..=8`.
    #[error("tile {value} at row {row}, column {column} is outside 0..=8")]
    TileOutOfRange { value: u8, row: usize, column: usize },

    /// A value appears in more than one cell.
    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },

    /// Parsed input did not contain exactly nine tiles.
    #[error("expected 9 tiles, found {found}")]
    TileCount { found: usize },

    /// A token in the input is not a tile number.
    #[error("could not parse tile `{0}`")]
    UnparsableTile(String),

    /// The grid has odd inversion parity and can never reach the goal.
    #[error("grid cannot reach the goal configuration")]
    Unsolvable,
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;

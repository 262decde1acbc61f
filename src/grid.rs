//! Grid representation and operations for the 3x3 sliding-tile puzzle.
//!
//! The grid is stored row-major as `grid[row][column]`. Each cell holds a
//! tile number 1-8, or 0 for the blank.

use crate::error::{PuzzleError, Result};

/// Cells per grid side.
pub const DIM: usize = 3;

/// Total number of cells (and distinct tile values).
pub const CELL_COUNT: usize = DIM * DIM;

/// The value marking the blank cell.
pub const BLANK: u8 = 0;

/// A 3x3 grid of tile values, indexed `[row][column]`.
pub type Grid = [[u8; DIM]; DIM];

/// A `(row, column)` position within the grid.
pub type Coord = (usize, usize);

/// The solved configuration.
///
/// Read column by column this is `[1, 4, 7]`, `[2, 5, 8]`, `[3, 6, 0]`,
/// so the blank ends in the bottom-right corner.
pub const GOAL: Grid = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

/// Converts a linear cell index to `(row, column)`.
///
/// Index order is row-major: `idx = row * DIM + column`.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (cell_index / DIM, cell_index % DIM)
}

/// Iterates every coordinate in row-major order.
pub fn coords() -> impl Iterator<Item = Coord> {
    (0..CELL_COUNT).map(idx_to_coord)
}

/// Checks that a grid is a permutation of `0..=8` and returns the blank
/// position.
///
/// Reports the first out-of-range value in row-major order, otherwise the
/// first value seen twice.
pub fn validate(grid: &Grid) -> Result<Coord> {
    let mut seen = [false; CELL_COUNT];
    // nine distinct values from 0..=8 always include the blank
    let mut blank = (0, 0);

    for (row, column) in coords() {
        let value = grid[row][column];
        let slot = seen
            .get_mut(value as usize)
            .ok_or(PuzzleError::TileOutOfRange { value, row, column })?;
        if *slot {
            return Err(PuzzleError::DuplicateTile { value });
        }
        *slot = true;
        if value == BLANK {
            blank = (row, column);
        }
    }

    Ok(blank)
}

/// Parses nine tile values given row by row.
///
/// Values may be separated by commas, whitespace, or both:
/// `"1,2,3 4,0,5 7,8,6"`. The result is validated before it is returned.
pub fn parse_grid(input: &str) -> Result<Grid> {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() != CELL_COUNT {
        return Err(PuzzleError::TileCount {
            found: tokens.len(),
        });
    }

    let mut grid = [[BLANK; DIM]; DIM];
    for (cell_index, token) in tokens.iter().enumerate() {
        let value: u8 = token
            .parse()
            .map_err(|_| PuzzleError::UnparsableTile((*token).to_string()))?;
        let (row, column) = idx_to_coord(cell_index);
        grid[row][column] = value;
    }

    validate(&grid)?;
    Ok(grid)
}

/// Counts tile pairs that appear in the opposite order to the goal.
///
/// The blank is ignored.
pub fn inversions(grid: &Grid) -> usize {
    let tiles: Vec<u8> = coords()
        .map(|(row, column)| grid[row][column])
        .filter(|&value| value != BLANK)
        .collect();

    tiles
        .iter()
        .enumerate()
        .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&next| next < value).count())
        .sum()
}

/// Formats a grid as three lines of tile numbers.
///
/// The blank shows as '.'.
pub fn format_grid(grid: &Grid) -> String {
    let mut output = String::new();

    for row in grid {
        let line: Vec<String> = row
            .iter()
            .map(|&value| {
                if value == BLANK {
                    ".".to_string()
                } else {
                    value.to_string()
                }
            })
            .collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_is_a_valid_permutation() {
        assert_eq!(validate(&GOAL), Ok((2, 2)));
    }

    #[test]
    fn test_goal_columns_match_column_major_layout() {
        let columns: Vec<[u8; DIM]> = (0..DIM)
            .map(|column| [GOAL[0][column], GOAL[1][column], GOAL[2][column]])
            .collect();
        assert_eq!(columns, vec![[1, 4, 7], [2, 5, 8], [3, 6, 0]]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_tile() {
        let grid = [[1, 2, 3], [4, 9, 6], [7, 8, 0]];
        assert_eq!(
            validate(&grid),
            Err(PuzzleError::TileOutOfRange {
                value: 9,
                row: 1,
                column: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_tile() {
        let grid = [[1, 2, 3], [4, 5, 6], [7, 8, 8]];
        assert_eq!(
            validate(&grid),
            Err(PuzzleError::DuplicateTile { value: 8 })
        );
    }

    #[test]
    fn test_parse_grid_accepts_mixed_separators() {
        let grid = parse_grid("1,2,3 4, 0 ,5\n7 8 6").unwrap();
        assert_eq!(grid, [[1, 2, 3], [4, 0, 5], [7, 8, 6]]);
    }

    #[test]
    fn test_parse_grid_reports_wrong_count() {
        assert_eq!(
            parse_grid("1 2 3 4 5 6 7 8"),
            Err(PuzzleError::TileCount { found: 8 })
        );
    }

    #[test]
    fn test_parse_grid_reports_bad_token() {
        assert_eq!(
            parse_grid("1 2 3 4 x 6 7 8 0"),
            Err(PuzzleError::UnparsableTile("x".to_string()))
        );
    }

    #[test]
    fn test_parse_grid_validates_permutation() {
        assert_eq!(
            parse_grid("1 1 3 4 5 6 7 8 0"),
            Err(PuzzleError::DuplicateTile { value: 1 })
        );
    }

    #[test]
    fn test_inversions() {
        assert_eq!(inversions(&GOAL), 0);
        assert_eq!(inversions(&[[1, 2, 3], [4, 5, 6], [8, 7, 0]]), 1);
        assert_eq!(inversions(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]), 0);
    }

    #[test]
    fn test_format_grid_marks_blank() {
        assert_eq!(format_grid(&GOAL), "1 2 3\n4 5 6\n7 8 .\n");
    }
}

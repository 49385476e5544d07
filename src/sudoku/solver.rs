#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as an exact cover problem.
//!
//! For an `n x n` board with `b x b` boxes the matrix has `4n²` columns, in four blocks:
//!
//! | block | column for placement `(r, c, d)` | meaning                          |
//! |-------|----------------------------------|----------------------------------|
//! | 0     | `r·n + c`                        | cell `(r, c)` holds some digit   |
//! | 1     | `n² + r·n + d`                   | row `r` holds digit `d`          |
//! | 2     | `2n² + c·n + d`                  | column `c` holds digit `d`       |
//! | 3     | `3n² + box(r, c)·n + d`          | box of `(r, c)` holds digit `d`  |
//!
//! There is one matrix row per allowed placement: all `n` digits for an empty cell, only the
//! given digit for a filled one. An exact cover selects exactly one placement per cell.

use crate::dlx::matrix::Matrix;
use crate::dlx::solution::Solution;
use itertools::Itertools;
use std::fmt::{self, Display};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading or validating a Sudoku board.
#[derive(Debug, Error)]
pub enum SudokuError {
    /// Reading the input failed.
    #[error("failed to read sudoku: {0}")]
    Io(#[from] io::Error),

    /// The board's side length is not one of 4, 9, 16 or 25.
    #[error("unsupported board size {0}, expected 4, 9, 16 or 25")]
    InvalidSize(usize),

    /// A row does not have as many cells as the board has rows.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Board size.
        expected: usize,
        /// Cells found in the row.
        found: usize,
    },

    /// A cell holds a digit larger than the board size.
    #[error("cell ({row}, {col}) holds {value}, which exceeds the board size")]
    InvalidValue {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The value found.
        value: usize,
    },

    /// A token is neither a number nor `.`.
    #[error("line {line}: cannot parse {token:?} as a cell")]
    InvalidToken {
        /// One-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// A square grid of digits, `0` marking an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps the rows of a grid.
    #[must_use]
    pub const fn new(board: Vec<Vec<usize>>) -> Self {
        Self(board)
    }

    /// Side length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the board with no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The digit at `(row, col)`, `0` when empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.0[row][col]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<usize>> {
        self.0.iter()
    }

    /// True when every cell is filled and no row, column or box repeats a digit.
    #[must_use]
    pub fn is_complete_and_valid(&self) -> bool {
        let Ok(size) = Size::try_from(self.len()) else {
            return false;
        };
        let n = usize::from(size);
        let b = size.block_size();
        let expected = (1..=n).collect_vec();

        let is_permutation = |cells: Vec<usize>| cells.into_iter().sorted().collect_vec() == expected;

        (0..n).all(|r| self.0[r].len() == n && is_permutation(self.0[r].clone()))
            && (0..n).all(|c| is_permutation((0..n).map(|r| self.0[r][c]).collect()))
            && (0..n).all(|k| {
                let (br, bc) = ((k / b) * b, (k % b) * b);
                is_permutation(
                    (0..b)
                        .cartesian_product(0..b)
                        .map(|(r, c)| self.0[br + r][bc + c])
                        .collect(),
                )
            })
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(board: Vec<Vec<usize>>) -> Self {
        Self::new(board)
    }
}

impl From<Board> for Vec<Vec<usize>> {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Board {
    fn from(board: [[usize; N]; N]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len().to_string().len();
        for row in &self.0 {
            let line = row
                .iter()
                .map(|&d| {
                    if d == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{d:>width$}")
                    }
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A small 4x4 puzzle with a unique solution.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [[1, 0, 0, 0], [0, 0, 3, 0], [0, 4, 0, 0], [0, 0, 0, 2]];

/// The 9x9 puzzle from Wikipedia's Sudoku article.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 16x16 puzzle.
pub const EXAMPLE_SIXTEEN: [[usize; 16]; 16] = [
    [0, 11, 0, 0, 0, 2, 3, 14, 0, 0, 9, 12, 0, 0, 0, 16],
    [15, 12, 0, 0, 0, 11, 0, 1, 13, 10, 0, 0, 0, 0, 7, 2],
    [0, 0, 10, 0, 0, 0, 0, 0, 16, 11, 0, 1, 6, 4, 12, 3],
    [0, 16, 14, 1, 0, 4, 0, 6, 0, 3, 0, 15, 0, 8, 0, 0],
    [1, 6, 5, 12, 0, 0, 11, 0, 0, 9, 8, 0, 0, 0, 0, 0],
    [0, 0, 0, 7, 14, 1, 8, 0, 0, 15, 6, 0, 13, 5, 0, 4],
    [4, 15, 8, 0, 9, 13, 0, 0, 0, 0, 7, 16, 3, 0, 0, 0],
    [0, 9, 13, 0, 0, 0, 0, 15, 10, 0, 0, 0, 7, 6, 0, 11],
    [14, 0, 6, 11, 0, 0, 0, 12, 7, 0, 0, 0, 0, 3, 13, 0],
    [0, 0, 0, 5, 8, 14, 0, 0, 0, 0, 13, 11, 0, 1, 2, 6],
    [13, 0, 16, 4, 0, 15, 5, 0, 0, 1, 12, 6, 8, 0, 0, 0],
    [0, 0, 0, 0, 0, 16, 10, 0, 0, 8, 0, 0, 11, 9, 4, 5],
    [0, 0, 11, 0, 1, 0, 14, 0, 5, 0, 3, 0, 15, 7, 16, 0],
    [5, 13, 15, 3, 16, 0, 4, 7, 0, 0, 0, 0, 0, 2, 0, 0],
    [16, 1, 0, 0, 0, 0, 12, 2, 14, 0, 15, 0, 0, 0, 3, 8],
    [9, 0, 0, 0, 13, 5, 0, 0, 8, 6, 16, 0, 0, 0, 10, 0],
];

/// Supported board sizes.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash)]
pub enum Size {
    /// 4x4 with 2x2 boxes.
    Four = 4,
    /// 9x9 with 3x3 boxes.
    Nine = 9,
    /// 16x16 with 4x4 boxes.
    Sixteen = 16,
    /// 25x25 with 5x5 boxes.
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = SudokuError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(SudokuError::InvalidSize(value)),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size as Self
    }
}

impl Size {
    /// Side length of a box.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }
}

/// A digit placed in a cell; all indices zero-based, `digit` one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Digit, `1..=n`.
    pub digit: usize,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(row: usize, col: usize, digit: usize) -> Self {
        Self { row, col, digit }
    }

    /// The four constraint columns this placement satisfies.
    #[must_use]
    pub const fn columns(&self, size: Size) -> [usize; 4] {
        let n = size as usize;
        let b = size.block_size();
        let d = self.digit - 1;
        let square = (self.row / b) * b + self.col / b;
        [
            self.row * n + self.col,
            n * n + self.row * n + d,
            2 * n * n + self.col * n + d,
            3 * n * n + square * n + d,
        ]
    }
}

/// A validated Sudoku puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// The givens.
    pub board: Board,
    /// The board size.
    pub size: Size,
}

/// The exact cover form of a puzzle, with the placement behind each matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuCover {
    /// The constraint matrix.
    pub matrix: Matrix,
    placements: Vec<Placement>,
    size: Size,
}

impl SudokuCover {
    /// The placement encoded by matrix row `row`.
    #[must_use]
    pub fn placement(&self, row: usize) -> Option<Placement> {
        self.placements.get(row).copied()
    }

    /// Fills a board from the placements selected by `solution`.
    ///
    /// Cells not covered by the solution stay `0`.
    #[must_use]
    pub fn decode(&self, solution: &Solution) -> Board {
        let n = usize::from(self.size);
        let mut board = vec![vec![0; n]; n];
        for placement in solution.iter().filter_map(|&row| self.placement(row)) {
            board[placement.row][placement.col] = placement.digit;
        }
        Board::new(board)
    }
}

impl Sudoku {
    /// Validates `board` as a puzzle.
    ///
    /// # Errors
    ///
    /// [`SudokuError::InvalidSize`], [`SudokuError::RaggedRow`] or
    /// [`SudokuError::InvalidValue`] when the board is not a well-formed grid.
    pub fn new(board: Board) -> Result<Self, SudokuError> {
        let size = Size::try_from(board.len())?;
        let n = usize::from(size);
        for (row, cells) in board.rows().enumerate() {
            if cells.len() != n {
                return Err(SudokuError::RaggedRow {
                    row,
                    expected: n,
                    found: cells.len(),
                });
            }
            if let Some((col, &value)) = cells.iter().find_position(|&&v| v > n) {
                return Err(SudokuError::InvalidValue { row, col, value });
            }
        }
        Ok(Self { board, size })
    }

    /// Reduces the puzzle to exact cover.
    ///
    /// Contradictory givens still produce a valid matrix; it simply has no exact cover.
    ///
    /// # Errors
    ///
    /// Never in practice: the constraint columns are always in range for a validated board.
    pub fn to_exact_cover(&self) -> Result<SudokuCover, crate::dlx::matrix::MatrixError> {
        let n = usize::from(self.size);
        let placements = (0..n)
            .cartesian_product(0..n)
            .flat_map(|(row, col)| {
                let given = self.board.get(row, col);
                let digits = if given == 0 { 1..=n } else { given..=given };
                digits.map(move |digit| Placement::new(row, col, digit))
            })
            .collect_vec();

        let matrix = Matrix::from_sparse(
            4 * n * n,
            placements.iter().map(|p| p.columns(self.size)),
        )?;

        Ok(SudokuCover {
            matrix,
            placements,
            size: self.size,
        })
    }
}

impl TryFrom<Board> for Sudoku {
    type Error = SudokuError;

    fn try_from(board: Board) -> Result<Self, Self::Error> {
        Self::new(board)
    }
}

impl From<Sudoku> for Board {
    fn from(sudoku: Sudoku) -> Self {
        sudoku.board
    }
}

impl Display for Sudoku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Parses a board from text: one row per line, cells separated by whitespace, `0` or `.` for an
/// empty cell. Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// [`SudokuError::InvalidToken`] for unparsable cells, otherwise see [`Sudoku::new`].
pub fn parse_sudoku_str(input: &str) -> Result<Sudoku, SudokuError> {
    let mut rows = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row = trimmed
            .split_whitespace()
            .map(|token| match token {
                "." => Ok(0),
                _ => token.parse::<usize>().map_err(|_| SudokuError::InvalidToken {
                    line: index + 1,
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Sudoku::new(Board::new(rows))
}

/// Parses a board file, see [`parse_sudoku_str`].
///
/// # Errors
///
/// [`SudokuError::Io`] if the file cannot be read, otherwise see [`parse_sudoku_str`].
pub fn parse_sudoku_file<P: AsRef<Path>>(path: P) -> Result<Sudoku, SudokuError> {
    let contents = std::fs::read_to_string(path)?;
    parse_sudoku_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::solver::solve;

    fn solve_board(board: Board) -> Option<Board> {
        let sudoku = Sudoku::new(board).unwrap();
        let cover = sudoku.to_exact_cover().unwrap();
        solve(&cover.matrix).map(|s| cover.decode(&s))
    }

    fn keeps_givens(puzzle: &Board, solved: &Board) -> bool {
        (0..puzzle.len())
            .cartesian_product(0..puzzle.len())
            .all(|(r, c)| puzzle.get(r, c) == 0 || puzzle.get(r, c) == solved.get(r, c))
    }

    #[test]
    fn test_matrix_shape() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_FOUR)).unwrap();
        let cover = sudoku.to_exact_cover().unwrap();
        // 4 givens with one placement each, 12 empty cells with four each
        assert_eq!(cover.matrix.num_rows(), 4 + 12 * 4);
        assert_eq!(cover.matrix.num_columns(), 64);
        for row in 0..cover.matrix.num_rows() {
            assert_eq!(cover.matrix.ones(row).count(), 4);
        }
    }

    #[test]
    fn test_placement_columns() {
        let p = Placement::new(8, 8, 9);
        assert_eq!(p.columns(Size::Nine), [80, 81 + 80, 162 + 80, 243 + 80]);
        let p = Placement::new(4, 5, 1);
        // box (1, 1) is box 4
        assert_eq!(p.columns(Size::Nine)[3], 243 + 4 * 9);
    }

    #[test]
    fn test_solve_four() {
        let puzzle = Board::from(EXAMPLE_FOUR);
        let solved = solve_board(puzzle.clone()).unwrap();
        assert!(solved.is_complete_and_valid());
        assert!(keeps_givens(&puzzle, &solved));
    }

    #[test]
    fn test_solve_nine() {
        let puzzle = Board::from(EXAMPLE_NINE);
        let solved = solve_board(puzzle.clone()).unwrap();
        assert!(solved.is_complete_and_valid());
        assert!(keeps_givens(&puzzle, &solved));
        assert_eq!(solved.rows().next().unwrap(), &vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[test]
    fn test_empty_board_is_solvable() {
        let solved = solve_board(Board::new(vec![vec![0; 9]; 9])).unwrap();
        assert!(solved.is_complete_and_valid());
    }

    #[test]
    fn test_contradictory_givens() {
        let mut board = vec![vec![0; 4]; 4];
        board[0][0] = 1;
        board[0][3] = 1;
        assert_eq!(solve_board(Board::new(board)), None);
    }

    #[test]
    fn test_invalid_boards() {
        assert!(matches!(
            Sudoku::new(Board::new(vec![vec![0; 5]; 5])),
            Err(SudokuError::InvalidSize(5))
        ));
        let mut ragged = vec![vec![0; 4]; 4];
        ragged[2].pop();
        assert!(matches!(
            Sudoku::new(Board::new(ragged)),
            Err(SudokuError::RaggedRow {
                row: 2,
                expected: 4,
                found: 3
            })
        ));
        let mut too_big = vec![vec![0; 4]; 4];
        too_big[1][3] = 5;
        assert!(matches!(
            Sudoku::new(Board::new(too_big)),
            Err(SudokuError::InvalidValue {
                row: 1,
                col: 3,
                value: 5
            })
        ));
    }

    #[test]
    fn test_parse_sudoku_str() {
        let input = "# a 4x4 puzzle\n1 . . .\n. . 3 .\n\n. 4 . .\n0 0 0 2\n";
        let sudoku = parse_sudoku_str(input).unwrap();
        assert_eq!(sudoku.size, Size::Four);
        assert_eq!(sudoku.board, Board::from(EXAMPLE_FOUR));
    }

    #[test]
    fn test_parse_sudoku_bad_token() {
        let err = parse_sudoku_str("1 x . .\n").unwrap_err();
        assert!(matches!(err, SudokuError::InvalidToken { line: 1, .. }));
    }

    #[test]
    fn test_board_display() {
        let board = Board::from(EXAMPLE_FOUR);
        assert_eq!(board.to_string(), "1 . . .\n. . 3 .\n. 4 . .\n. . . 2\n");
        let wide = Board::new(vec![vec![16; 16]; 16]);
        assert!(wide.to_string().starts_with("16 16"));
    }

    #[test]
    fn test_is_complete_and_valid_rejects_repeats() {
        let solved = solve_board(Board::from(EXAMPLE_FOUR)).unwrap();
        let mut rows: Vec<Vec<usize>> = solved.into();
        rows[0].swap(0, 1);
        assert!(!Board::new(rows).is_complete_and_valid());
    }
}

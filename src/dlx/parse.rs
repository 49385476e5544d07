#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for plain-text 0/1 matrices.
//!
//! The format is line based:
//! - Each data line is one matrix row. The characters `0` and `1` are entries; whitespace,
//!   `,`, `[` and `]` are ignored, so both `1001` and `[1, 0, 0, 1],` are accepted.
//! - Lines whose first non-blank character is `c` or `#` are comments.
//! - Blank lines are skipped.
//! - A line holding only `%` ends the data; anything after it is ignored.
//!
//! Shape checks (non-empty, rectangular) are delegated to [`Matrix::new`].

use crate::dlx::matrix::{Matrix, MatrixError};
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a text matrix.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input failed.
    #[error("failed to read matrix: {0}")]
    Io(#[from] io::Error),

    /// A data line contained a character that is neither an entry nor a separator.
    #[error("line {line}: unexpected character {character:?}")]
    InvalidCharacter {
        /// One-based line number.
        line: usize,
        /// The offending character.
        character: char,
    },

    /// The rows read do not form a valid matrix.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Parses a matrix from a buffered reader.
///
/// # Errors
///
/// [`ParseError::Io`] if reading fails, [`ParseError::InvalidCharacter`] for unexpected input
/// and [`ParseError::Matrix`] if the rows are empty or ragged.
pub fn parse_matrix<R: BufRead>(reader: R) -> Result<Matrix, ParseError> {
    let mut rows: Vec<Vec<bool>> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        match trimmed.chars().next() {
            None | Some('c' | '#') => continue,
            Some('%') if trimmed == "%" => break,
            Some(_) => {}
        }

        let mut row = Vec::with_capacity(trimmed.len());
        for character in trimmed.chars() {
            match character {
                '0' => row.push(false),
                '1' => row.push(true),
                ',' | '[' | ']' => {}
                c if c.is_whitespace() => {}
                c => {
                    return Err(ParseError::InvalidCharacter {
                        line: index + 1,
                        character: c,
                    });
                }
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(Matrix::new(rows)?)
}

/// Parses a matrix from a string.
///
/// # Errors
///
/// See [`parse_matrix`].
pub fn parse_str(input: &str) -> Result<Matrix, ParseError> {
    parse_matrix(input.as_bytes())
}

/// Parses a matrix file.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be opened, otherwise see [`parse_matrix`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Matrix, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_matrix(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_compact_rows() {
        let m = parse_str("101\n010\n").unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_columns(), 3);
        assert_eq!(m.get(0, 0), Some(true));
        assert_eq!(m.get(1, 1), Some(true));
        assert_eq!(m.get(1, 2), Some(false));
    }

    #[test]
    fn test_parse_bracketed_rows() {
        let input = "[1, 0, 0, 1],\n[0, 1, 1, 0]\n";
        let m = parse_matrix(Cursor::new(input)).unwrap();
        assert_eq!(m.to_string(), "1001\n0110\n");
    }

    #[test]
    fn test_comments_blank_lines_and_end_marker() {
        let input = "c example\n# another comment\n\n1 1\n  \n0 1\n%\n1 0 1 0\n";
        let m = parse_str(input).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_columns(), 2);
    }

    #[test]
    fn test_invalid_character() {
        let err = parse_str("10\n1x\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCharacter {
                line: 2,
                character: 'x'
            }
        ));
        assert_eq!(err.to_string(), "line 2: unexpected character 'x'");
    }

    #[test]
    fn test_non_binary_digit_rejected() {
        let err = parse_str("12\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCharacter {
                line: 1,
                character: '2'
            }
        ));
    }

    #[test]
    fn test_ragged_input() {
        let err = parse_str("101\n01\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Matrix(MatrixError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let err = parse_str("c nothing here\n").unwrap_err();
        assert!(matches!(err, ParseError::Matrix(MatrixError::NoRows)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("this/path/does/not/exist.matrix").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}

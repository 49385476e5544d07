#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The validated 0/1 input matrix handed to the builder.
//!
//! A `Matrix` is always non-empty and rectangular: every constructor checks the shape up front
//! and returns a [`MatrixError`] instead of producing a partially valid value. Rows are stored
//! as packed bit vectors, so even large reductions (a 25x25 Sudoku has 390 625 candidate rows)
//! stay compact.

use bit_vec::BitVec;
use itertools::Itertools;
use std::fmt::{self, Display};
use thiserror::Error;

/// Errors raised while validating an input matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has no rows at all.
    #[error("matrix must contain at least one row")]
    NoRows,

    /// The matrix has rows, but they are all zero-length.
    #[error("matrix must contain at least one column")]
    NoColumns,

    /// A row's length differs from the first row's length.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Column count taken from the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// An entry other than 0 or 1 was supplied.
    #[error("entry ({row}, {column}) is {value}, only 0 and 1 are allowed")]
    InvalidEntry {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
        /// The value found there.
        value: u8,
    },

    /// A sparse row referenced a column outside the matrix.
    #[error("row {row} references column {column}, but the matrix has {num_columns} columns")]
    ColumnOutOfRange {
        /// Index of the offending row.
        row: usize,
        /// The column that was referenced.
        column: usize,
        /// Number of columns in the matrix.
        num_columns: usize,
    },
}

/// A rectangular binary matrix with at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<BitVec>,
    num_columns: usize,
}

impl Matrix {
    /// Builds a matrix from dense boolean rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NoRows`], [`MatrixError::NoColumns`] or [`MatrixError::Ragged`]
    /// when the input is not a non-empty rectangle.
    pub fn new<I, R>(rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = bool>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<BitVec>())
            .collect_vec();

        let num_columns = rows.first().ok_or(MatrixError::NoRows)?.len();
        if num_columns == 0 {
            return Err(MatrixError::NoColumns);
        }

        if let Some((row, bits)) = rows.iter().find_position(|bits| bits.len() != num_columns) {
            return Err(MatrixError::Ragged {
                row,
                expected: num_columns,
                found: bits.len(),
            });
        }

        Ok(Self { rows, num_columns })
    }

    /// Builds a matrix from rows given as the sorted-or-not list of their set columns.
    ///
    /// Duplicate column indices within a row are harmless.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NoRows`] for an empty row list, [`MatrixError::NoColumns`] when
    /// `num_columns` is zero and [`MatrixError::ColumnOutOfRange`] for any index `>= num_columns`.
    pub fn from_sparse<I, R>(num_columns: usize, rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = usize>,
    {
        if num_columns == 0 {
            return Err(MatrixError::NoColumns);
        }

        let mut dense = Vec::new();
        for (row, columns) in rows.into_iter().enumerate() {
            let mut bits = BitVec::from_elem(num_columns, false);
            for column in columns {
                if column >= num_columns {
                    return Err(MatrixError::ColumnOutOfRange {
                        row,
                        column,
                        num_columns,
                    });
                }
                bits.set(column, true);
            }
            dense.push(bits);
        }

        if dense.is_empty() {
            return Err(MatrixError::NoRows);
        }

        Ok(Self {
            rows: dense,
            num_columns,
        })
    }

    /// Builds a matrix from `u8` rows, rejecting anything that is not 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidEntry`] for the first out-of-range value, otherwise the same
    /// shape errors as [`Matrix::new`].
    pub fn from_bytes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MatrixError> {
        for (row, values) in rows.iter().enumerate() {
            if let Some((column, &value)) = values.as_ref().iter().find_position(|&&v| v > 1) {
                return Err(MatrixError::InvalidEntry { row, column, value });
            }
        }
        Self::new(rows.iter().map(|r| r.as_ref().iter().map(|&v| v == 1)))
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub const fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Total number of set entries.
    #[must_use]
    pub fn num_ones(&self) -> usize {
        self.rows
            .iter()
            .map(|bits| bits.iter().filter(|&b| b).count())
            .sum()
    }

    /// The entry at `(row, column)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.rows.get(row)?.get(column)
    }

    /// The packed bits of `row`.
    ///
    /// # Panics
    ///
    /// If `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &BitVec {
        &self.rows[row]
    }

    /// The set columns of `row`, ascending.
    ///
    /// # Panics
    ///
    /// If `row` is out of bounds.
    pub fn ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[row]
            .iter()
            .enumerate()
            .filter_map(|(column, bit)| bit.then_some(column))
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &BitVec> {
        self.rows.iter()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_bytes(&rows)
    }
}

impl<const N: usize> TryFrom<&[[u8; N]]> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: &[[u8; N]]) -> Result<Self, Self::Error> {
        Self::from_bytes(rows)
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bits in &self.rows {
            let line: String = bits.iter().map(|b| if b { '1' } else { '0' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_shape() {
        let m = Matrix::from_bytes(&[[1u8, 0, 1], [0, 1, 0]]).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_columns(), 3);
        assert_eq!(m.num_ones(), 3);
        assert_eq!(m.get(0, 2), Some(true));
        assert_eq!(m.get(1, 2), Some(false));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.ones(0).collect_vec(), vec![0, 2]);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let rows: Vec<Vec<bool>> = vec![];
        assert_eq!(Matrix::new(rows), Err(MatrixError::NoRows));
    }

    #[test]
    fn test_zero_width_rejected() {
        let rows: Vec<Vec<bool>> = vec![vec![], vec![]];
        assert_eq!(Matrix::new(rows), Err(MatrixError::NoColumns));
    }

    #[test]
    fn test_ragged_rejected() {
        let rows = vec![vec![1u8, 0, 1], vec![1, 0], vec![0, 0, 0]];
        assert_eq!(
            Matrix::try_from(rows),
            Err(MatrixError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_non_binary_entry_rejected() {
        let rows = vec![vec![1u8, 0], vec![0, 2]];
        assert_eq!(
            Matrix::try_from(rows),
            Err(MatrixError::InvalidEntry {
                row: 1,
                column: 1,
                value: 2
            })
        );
    }

    #[test]
    fn test_from_sparse() {
        let m = Matrix::from_sparse(4, vec![vec![3, 0], vec![], vec![1, 1]]).unwrap();
        assert_eq!(m.ones(0).collect_vec(), vec![0, 3]);
        assert_eq!(m.ones(1).count(), 0);
        assert_eq!(m.ones(2).collect_vec(), vec![1]);
    }

    #[test]
    fn test_from_sparse_out_of_range() {
        let err = Matrix::from_sparse(2, vec![vec![0], vec![2]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::ColumnOutOfRange {
                row: 1,
                column: 2,
                num_columns: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "row 1 references column 2, but the matrix has 2 columns"
        );
    }

    #[test]
    fn test_display() {
        let m = Matrix::try_from(vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(m.to_string(), "10\n01\n");
    }
}

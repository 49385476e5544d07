#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exact covers found by the search.

use crate::dlx::matrix::Matrix;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{self, Display};
use std::ops::Index;

/// The rows of one exact cover, in the order the search selected them.
///
/// The order follows the columns the search satisfied, not ascending row index; use
/// [`Solution::sorted`] for a canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Solution(Vec<usize>);

impl Solution {
    /// Wraps an ordered list of row indices.
    #[must_use]
    pub const fn new(rows: Vec<usize>) -> Self {
        Self(rows)
    }

    /// Selected rows in selection order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.0
    }

    /// Selected rows in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<usize> {
        self.0.iter().copied().sorted_unstable().collect_vec()
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the selected rows in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    /// Whether `row` was selected.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.0.contains(&row)
    }

    /// How many selected rows cover each column of `matrix`.
    ///
    /// Rows outside the matrix are ignored.
    #[must_use]
    pub fn column_counts(&self, matrix: &Matrix) -> Vec<usize> {
        let mut counts = vec![0; matrix.num_columns()];
        for &row in self.0.iter().filter(|&&r| r < matrix.num_rows()) {
            for column in matrix.ones(row) {
                counts[column] += 1;
            }
        }
        counts
    }

    /// Checks that the selection is an exact cover of `matrix`: every row index is in range
    /// and selected once, and every column is covered by exactly one selected row.
    #[must_use]
    pub fn verify(&self, matrix: &Matrix) -> bool {
        let mut seen = FxHashSet::default();
        let rows_ok = self
            .0
            .iter()
            .all(|&row| row < matrix.num_rows() && seen.insert(row));

        rows_ok && self.column_counts(matrix).iter().all(|&count| count == 1)
    }
}

impl Index<usize> for Solution {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<usize>> for Solution {
    fn from(rows: Vec<usize>) -> Self {
        Self::new(rows)
    }
}

impl From<Solution> for Vec<usize> {
    fn from(solution: Solution) -> Self {
        solution.0
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Matrix {
        Matrix::from_bytes(&[
            [1u8, 0, 0, 1, 0, 0, 1],
            [1, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 1, 1, 0, 1],
            [0, 0, 1, 0, 1, 1, 0],
            [0, 1, 1, 0, 0, 1, 1],
            [0, 1, 0, 0, 0, 0, 1],
        ])
        .unwrap()
    }

    #[test]
    fn test_verify_accepts_exact_cover() {
        let solution = Solution::from(vec![1, 3, 5]);
        assert!(solution.verify(&example()));
        assert_eq!(solution.column_counts(&example()), vec![1; 7]);
    }

    #[test]
    fn test_verify_rejects_overlap() {
        let solution = Solution::from(vec![1, 3, 4]);
        let counts = solution.column_counts(&example());
        assert_eq!(counts, vec![1, 1, 2, 1, 1, 2, 1]);
        assert!(!solution.verify(&example()));
    }

    #[test]
    fn test_verify_rejects_gap() {
        assert!(!Solution::from(vec![1, 3]).verify(&example()));
        assert!(!Solution::default().verify(&example()));
    }

    #[test]
    fn test_verify_rejects_out_of_range_and_duplicates() {
        let m = Matrix::from_bytes(&[[1u8, 0], [0, 1], [0, 0]]).unwrap();
        assert!(Solution::from(vec![0, 1]).verify(&m));
        assert!(Solution::from(vec![0, 1, 2]).verify(&m));
        assert!(!Solution::from(vec![0, 1, 2, 2]).verify(&m));
        assert!(!Solution::from(vec![0, 1, 7]).verify(&m));
    }

    #[test]
    fn test_sorted_and_display() {
        let solution = Solution::from(vec![5, 1, 3]);
        assert_eq!(solution.sorted(), vec![1, 3, 5]);
        assert_eq!(solution.rows(), &[5, 1, 3]);
        assert_eq!(solution[0], 5);
        assert_eq!(solution.to_string(), "[5, 1, 3]");
        assert!(solution.contains(3));
        assert!(!solution.contains(4));
    }
}

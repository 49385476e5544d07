//! Random exact cover instances with a planted solution.
//!
//! The columns are shuffled and cut into consecutive groups; each group becomes one row of the
//! hidden cover. Distractor rows with independently random entries are added on top, and all
//! rows are shuffled together, so the planted cover is guaranteed to exist but is not
//! necessarily the one the search finds first.

use crate::dlx::matrix::{Matrix, MatrixError};
use itertools::Itertools;

/// Parameters of a planted instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planted {
    /// Number of columns.
    pub columns: usize,
    /// Number of random rows added on top of the planted cover.
    pub extra_rows: usize,
    /// Probability of each entry of a distractor row being set.
    pub density: f64,
    /// Largest number of columns a planted row may cover.
    pub max_group: usize,
    /// Seed of the random generator.
    pub seed: u64,
}

impl Default for Planted {
    fn default() -> Self {
        Self {
            columns: 32,
            extra_rows: 64,
            density: 0.2,
            max_group: 4,
            seed: 0,
        }
    }
}

/// A generated matrix together with the rows of its planted cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantedInstance {
    /// The matrix.
    pub matrix: Matrix,
    /// Indices of the planted rows, ascending.
    pub cover: Vec<usize>,
}

impl Planted {
    /// Generates the instance described by these parameters.
    ///
    /// The same parameters always produce the same instance.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NoColumns`] when `columns` is zero.
    pub fn generate(&self) -> Result<PlantedInstance, MatrixError> {
        if self.columns == 0 {
            return Err(MatrixError::NoColumns);
        }

        let mut rng = fastrand::Rng::with_seed(self.seed);
        let max_group = self.max_group.clamp(1, self.columns);
        let density = self.density.clamp(0.0, 1.0);

        let mut order = (0..self.columns).collect_vec();
        rng.shuffle(&mut order);

        let mut rows: Vec<(bool, Vec<usize>)> = Vec::new();
        let mut rest = order.as_slice();
        while !rest.is_empty() {
            let take = rng.usize(1..=max_group.min(rest.len()));
            let (group, tail) = rest.split_at(take);
            rows.push((true, group.to_vec()));
            rest = tail;
        }

        for _ in 0..self.extra_rows {
            let mut ones = (0..self.columns)
                .filter(|_| rng.f64() < density)
                .collect_vec();
            if ones.is_empty() {
                ones.push(rng.usize(..self.columns));
            }
            rows.push((false, ones));
        }

        rng.shuffle(&mut rows);

        let cover = rows
            .iter()
            .positions(|(planted, _)| *planted)
            .collect_vec();
        let matrix = Matrix::from_sparse(self.columns, rows.into_iter().map(|(_, ones)| ones))?;
        Ok(PlantedInstance { matrix, cover })
    }
}

/// Generates a planted instance with the default group size.
///
/// # Errors
///
/// [`MatrixError::NoColumns`] when `columns` is zero.
pub fn planted(
    columns: usize,
    extra_rows: usize,
    density: f64,
    seed: u64,
) -> Result<PlantedInstance, MatrixError> {
    Planted {
        columns,
        extra_rows,
        density,
        seed,
        ..Planted::default()
    }
    .generate()
}

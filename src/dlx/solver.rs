#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The common interface of the exact cover solvers and their configuration.
//!
//! A solver owns one [`Links`] structure and searches it for the first exact cover. Solvers are
//! generic over a [`SolverConfig`], which fixes the column selection strategy at compile time;
//! [`DynamicConfig`] defers that choice to run time for the command line.

use crate::dlx::builder::build;
use crate::dlx::column_selection::{ColumnSelection, ColumnSelectionImpls, MinimumRemaining};
use crate::dlx::iterative::IterativeAlgorithmX;
use crate::dlx::links::Links;
use crate::dlx::matrix::Matrix;
use crate::dlx::recursive::AlgorithmX;
use crate::dlx::solution::Solution;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Compile-time configuration of a solver.
pub trait SolverConfig: Debug + Clone {
    /// The column selection strategy.
    type ColumnSelector: ColumnSelection + Default;
}

/// Minimum-remaining-values column selection, as in Knuth's paper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type ColumnSelector = MinimumRemaining;
}

/// Column selection picked at run time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type ColumnSelector = ColumnSelectionImpls;
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SearchStats {
    /// Search tree nodes entered (calls of the recursive step).
    pub nodes: usize,
    /// Candidate rows placed into the partial solution.
    pub rows_tried: usize,
    /// Rows taken back out after their subtree failed.
    pub backtracks: usize,
    /// Nodes abandoned because the chosen column had no candidates.
    pub dead_ends: usize,
    /// Links rewired by cover operations.
    pub updates: usize,
    /// Deepest partial solution reached.
    pub max_depth: usize,
}

/// An exact cover solver.
pub trait Solver<Config: SolverConfig = DefaultConfig> {
    /// Builds the linked structure for `matrix` and a solver over it.
    fn new(matrix: &Matrix) -> Self;

    /// Creates a solver from an already built structure and a column selector.
    fn from_parts(links: Links, selector: Config::ColumnSelector) -> Self;

    /// Searches for the first exact cover.
    ///
    /// Returns `None` when no cover exists. The structure is fully restored before returning,
    /// so calling `solve` again repeats the same search and gives the same answer.
    fn solve(&mut self) -> Option<Solution>;

    /// Statistics of the most recent search.
    fn stats(&self) -> SearchStats;

    /// The linked structure the solver works on.
    fn links(&self) -> &Links;
}

/// Names of the available search drivers.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum SolverType {
    /// Native recursion, one stack frame per selected row.
    #[default]
    Recursive,
    /// Explicit stack of choice points, no recursion.
    Iterative,
}

impl Display for SolverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Iterative => write!(f, "iterative"),
        }
    }
}

impl SolverType {
    /// Builds the named solver over `links`.
    #[must_use]
    pub fn to_impl<Config: SolverConfig>(
        self,
        links: Links,
        selector: Config::ColumnSelector,
    ) -> SolverImpls<Config> {
        match self {
            Self::Recursive => SolverImpls::Recursive(AlgorithmX::from_parts(links, selector)),
            Self::Iterative => {
                SolverImpls::Iterative(IterativeAlgorithmX::from_parts(links, selector))
            }
        }
    }
}

/// Runtime-selected solver.
#[derive(Debug, Clone)]
pub enum SolverImpls<Config: SolverConfig = DefaultConfig> {
    /// See [`AlgorithmX`].
    Recursive(AlgorithmX<Config>),
    /// See [`IterativeAlgorithmX`].
    Iterative(IterativeAlgorithmX<Config>),
}

impl<Config: SolverConfig> Solver<Config> for SolverImpls<Config> {
    fn new(matrix: &Matrix) -> Self {
        Self::Recursive(AlgorithmX::new(matrix))
    }

    fn from_parts(links: Links, selector: Config::ColumnSelector) -> Self {
        Self::Recursive(AlgorithmX::from_parts(links, selector))
    }

    fn solve(&mut self) -> Option<Solution> {
        match self {
            Self::Recursive(s) => s.solve(),
            Self::Iterative(s) => s.solve(),
        }
    }

    fn stats(&self) -> SearchStats {
        match self {
            Self::Recursive(s) => s.stats(),
            Self::Iterative(s) => s.stats(),
        }
    }

    fn links(&self) -> &Links {
        match self {
            Self::Recursive(s) => s.links(),
            Self::Iterative(s) => s.links(),
        }
    }
}

/// Finds the first exact cover of `matrix` with the default configuration.
#[must_use]
pub fn solve(matrix: &Matrix) -> Option<Solution> {
    AlgorithmX::<DefaultConfig>::from_parts(build(matrix), MinimumRemaining).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::column_selection::ColumnSelectionType;

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
    fn test_solve_example() {
        let solution = solve(&example()).unwrap();
        assert_eq!(solution.rows(), &[1, 3, 5]);
        assert!(solution.verify(&example()));
    }

    #[test]
    fn test_every_solver_and_selector_agrees_on_validity() {
        let matrix = example();
        for solver_type in [SolverType::Recursive, SolverType::Iterative] {
            for selection in [ColumnSelectionType::MinimumRemaining, ColumnSelectionType::Leftmost] {
                let mut solver =
                    solver_type.to_impl::<DynamicConfig>(build(&matrix), selection.to_impl());
                let solution = solver.solve().unwrap();
                assert!(solution.verify(&matrix), "{solver_type} / {selection}");
                assert_eq!(solution.sorted(), vec![1, 3, 5]);
                assert_eq!(solver.links(), &build(&matrix));
            }
        }
    }

    #[test]
    fn test_solver_impls_default_is_recursive() {
        let solver = SolverImpls::<DefaultConfig>::new(&example());
        assert!(matches!(solver, SolverImpls::Recursive(_)));
        assert_eq!(SolverType::default().to_string(), "recursive");
    }
}

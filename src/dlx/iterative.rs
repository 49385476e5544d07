//! Algorithm X with an explicit stack of choice points instead of recursion.
//!
//! Each frame remembers the column a level covered and the row currently selected in it.
//! Descending pushes a frame; backtracking uncovers the frame's row, moves it one cell down and
//! either covers the next row or, once the column is exhausted, uncovers the column and pops.
//! Rows are tried in the same order as [`AlgorithmX`](crate::dlx::recursive::AlgorithmX), so
//! both drivers find the same first solution.

use crate::dlx::builder::build;
use crate::dlx::column_selection::ColumnSelection;
use crate::dlx::links::{Links, NodeId};
use crate::dlx::matrix::Matrix;
use crate::dlx::recursive::{extract, unwind};
use crate::dlx::solution::Solution;
use crate::dlx::solver::{DefaultConfig, SearchStats, Solver, SolverConfig};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// A level of the search that still has rows left to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChoicePoint {
    column: NodeId,
    row: NodeId,
}

/// What the driver does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Enter a new level below the current frames.
    Descend,
    /// Abandon the top frame's current row.
    Backtrack,
}

/// Non-recursive Dancing Links solver.
#[derive(Debug, Clone)]
pub struct IterativeAlgorithmX<Config: SolverConfig = DefaultConfig> {
    links: Links,
    selector: Config::ColumnSelector,
    stack: SmallVec<[ChoicePoint; 32]>,
    stats: SearchStats,
}

impl<Config: SolverConfig> Solver<Config> for IterativeAlgorithmX<Config> {
    fn new(matrix: &Matrix) -> Self {
        Self::from_parts(build(matrix), Config::ColumnSelector::default())
    }

    fn from_parts(links: Links, selector: Config::ColumnSelector) -> Self {
        Self {
            links,
            selector,
            stack: SmallVec::new(),
            stats: SearchStats::default(),
        }
    }

    fn solve(&mut self) -> Option<Solution> {
        self.stats = SearchStats::default();
        self.stack.clear();

        if !self.run() {
            debug!(nodes = self.stats.nodes, "no exact cover");
            return None;
        }

        let mut partial: SmallVec<[NodeId; 32]> = self.stack.iter().map(|f| f.row).collect();
        let solution = extract(&self.links, &partial);
        debug!(rows = solution.len(), nodes = self.stats.nodes, "exact cover found");
        unwind(&mut self.links, &mut partial);
        self.stack.clear();
        Some(solution)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }

    fn links(&self) -> &Links {
        &self.links
    }
}

impl<Config: SolverConfig> IterativeAlgorithmX<Config> {
    /// Drives the search until the structure is fully covered (`true`, frames left in place)
    /// or every choice point is exhausted (`false`, structure restored).
    fn run(&mut self) -> bool {
        let mut step = Step::Descend;
        loop {
            step = match step {
                Step::Descend => {
                    self.stats.nodes += 1;
                    self.stats.max_depth = self.stats.max_depth.max(self.stack.len());

                    let Some(column) = self.selector.pick(&self.links) else {
                        return true;
                    };
                    if self.links.size(column) == 0 {
                        self.stats.dead_ends += 1;
                        Step::Backtrack
                    } else {
                        self.stats.updates += self.links.cover(column);
                        let row = self.links.down(column);
                        self.select(row);
                        self.stack.push(ChoicePoint { column, row });
                        Step::Descend
                    }
                }
                Step::Backtrack => {
                    let depth = self.stack.len().saturating_sub(1);
                    let Some(frame) = self.stack.last_mut() else {
                        return false;
                    };
                    self.links.uncover_row(frame.row);
                    self.stats.backtracks += 1;
                    trace!(depth, row = self.links.row_of(frame.row), "backtrack");

                    frame.row = self.links.down(frame.row);
                    if frame.row == frame.column {
                        self.links.uncover(frame.column);
                        self.stack.pop();
                        Step::Backtrack
                    } else {
                        let row = frame.row;
                        self.select(row);
                        Step::Descend
                    }
                }
            };
        }
    }

    fn select(&mut self, row: NodeId) {
        trace!(depth = self.stack.len(), row = self.links.row_of(row), "trying row");
        self.stats.rows_tried += 1;
        self.stats.updates += self.links.cover_row(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::recursive::AlgorithmX;

    fn matrix(rows: &[&[u8]]) -> Matrix {
        Matrix::from_bytes(rows).unwrap()
    }

    fn example() -> Matrix {
        matrix(&[
            &[1, 0, 0, 1, 0, 0, 1],
            &[1, 0, 0, 1, 0, 0, 0],
            &[0, 0, 0, 1, 1, 0, 1],
            &[0, 0, 1, 0, 1, 1, 0],
            &[0, 1, 1, 0, 0, 1, 1],
            &[0, 1, 0, 0, 0, 0, 1],
        ])
    }

    #[test]
    fn test_example_first_solution() {
        let mut solver = IterativeAlgorithmX::<DefaultConfig>::new(&example());
        let solution = solver.solve().unwrap();
        assert_eq!(solution.rows(), &[1, 3, 5]);
        assert_eq!(solver.links(), &build(&example()));
    }

    #[test]
    fn test_matches_recursive_stats() {
        let m = example();
        let mut iterative = IterativeAlgorithmX::<DefaultConfig>::new(&m);
        let mut recursive = AlgorithmX::<DefaultConfig>::new(&m);
        assert_eq!(iterative.solve(), recursive.solve());
        assert_eq!(iterative.stats(), recursive.stats());
    }

    #[test]
    fn test_unsolvable_restores_structure() {
        let m = matrix(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]]);
        let mut solver = IterativeAlgorithmX::<DefaultConfig>::new(&m);
        assert_eq!(solver.solve(), None);
        assert_eq!(solver.links(), &build(&m));
        let mut recursive = AlgorithmX::<DefaultConfig>::new(&m);
        assert_eq!(recursive.solve(), None);
        assert_eq!(solver.stats(), recursive.stats());
    }

    #[test]
    fn test_all_zero_column() {
        let m = matrix(&[&[1, 1, 0], &[0, 1, 0]]);
        let mut solver = IterativeAlgorithmX::<DefaultConfig>::new(&m);
        assert_eq!(solver.solve(), None);
        assert_eq!(solver.stats().dead_ends, 1);
    }

    #[test]
    fn test_deep_chain() {
        // the identity matrix forces one level per column
        let n = 200;
        let m = Matrix::from_sparse(n, (0..n).map(|i| vec![i])).unwrap();
        let mut solver = IterativeAlgorithmX::<DefaultConfig>::new(&m);
        let solution = solver.solve().unwrap();
        assert_eq!(solution.len(), n);
        assert_eq!(solution.sorted(), (0..n).collect::<Vec<_>>());
        assert_eq!(solver.stats().max_depth, n);
    }

    #[test]
    fn test_repeat_solve() {
        let m = example();
        let mut solver = IterativeAlgorithmX::<DefaultConfig>::new(&m);
        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first, second);
    }
}

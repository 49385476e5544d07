//! Knuth's Algorithm X driven by native recursion.
//!
//! Each level of the search:
//! 1.  stops with success when no column is left active;
//! 2.  picks a column with the configured selector and gives up on this branch if the column
//!     has no candidate rows;
//! 3.  covers the column, then tries its rows top to bottom. A row is pushed onto the partial
//!     solution and its other columns are covered left to right before recursing;
//! 4.  when the recursion fails, the row's columns are uncovered right to left and the row is
//!     popped, so the structure is back where it was before the row was tried;
//! 5.  once every row has failed, the column is uncovered and failure is reported upwards.
//!
//! On success the recursion returns straight up without undoing anything. The partial
//! solution is read off first, and only then is the structure unwound in reverse.

use crate::dlx::builder::build;
use crate::dlx::column_selection::ColumnSelection;
use crate::dlx::links::{Links, NodeId};
use crate::dlx::matrix::Matrix;
use crate::dlx::solution::Solution;
use crate::dlx::solver::{DefaultConfig, SearchStats, Solver, SolverConfig};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Recursive Dancing Links solver.
#[derive(Debug, Clone)]
pub struct AlgorithmX<Config: SolverConfig = DefaultConfig> {
    links: Links,
    selector: Config::ColumnSelector,
    /// One row cell per level, in selection order.
    partial: SmallVec<[NodeId; 32]>,
    stats: SearchStats,
}

impl<Config: SolverConfig> Solver<Config> for AlgorithmX<Config> {
    fn new(matrix: &Matrix) -> Self {
        Self::from_parts(build(matrix), Config::ColumnSelector::default())
    }

    fn from_parts(links: Links, selector: Config::ColumnSelector) -> Self {
        Self {
            links,
            selector,
            partial: SmallVec::new(),
            stats: SearchStats::default(),
        }
    }

    fn solve(&mut self) -> Option<Solution> {
        self.stats = SearchStats::default();
        self.partial.clear();

        if !self.search(0) {
            debug!(nodes = self.stats.nodes, "no exact cover");
            return None;
        }

        let solution = extract(&self.links, &self.partial);
        debug!(rows = solution.len(), nodes = self.stats.nodes, "exact cover found");
        unwind(&mut self.links, &mut self.partial);
        Some(solution)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }

    fn links(&self) -> &Links {
        &self.links
    }
}

impl<Config: SolverConfig> AlgorithmX<Config> {
    /// One level of the search. Returns `true` as soon as the structure is fully covered,
    /// leaving it covered and the partial solution filled in.
    fn search(&mut self, depth: usize) -> bool {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(column) = self.selector.pick(&self.links) else {
            return true;
        };
        if self.links.size(column) == 0 {
            self.stats.dead_ends += 1;
            return false;
        }

        self.stats.updates += self.links.cover(column);

        let mut row = self.links.down(column);
        while row != column {
            trace!(depth, row = self.links.row_of(row), "trying row");
            self.stats.rows_tried += 1;
            self.partial.push(row);
            self.stats.updates += self.links.cover_row(row);

            if self.search(depth + 1) {
                return true;
            }

            self.partial.pop();
            self.links.uncover_row(row);
            self.stats.backtracks += 1;
            trace!(depth, row = self.links.row_of(row), "backtrack");
            row = self.links.down(row);
        }

        self.links.uncover(column);
        false
    }
}

/// Reads the matrix row indices of the selected cells.
pub(crate) fn extract(links: &Links, partial: &[NodeId]) -> Solution {
    partial
        .iter()
        .filter_map(|&cell| links.row_of(cell))
        .collect::<Vec<_>>()
        .into()
}

/// Undoes a successful search: every level covered its column and then the other columns of
/// its row, so the levels are unwound deepest first, row before column.
pub(crate) fn unwind(links: &mut Links, partial: &mut SmallVec<[NodeId; 32]>) {
    while let Some(cell) = partial.pop() {
        links.uncover_row(cell);
        links.uncover(links.column_of(cell));
    }
}

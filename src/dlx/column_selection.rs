#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for picking the next column to branch on.
//!
//! Every active column has to be satisfied eventually, so any choice keeps the search complete;
//! the choice only changes how many branches are explored before the answer is found.

use crate::dlx::links::{Links, NodeId};
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Picks the column the search branches on next.
pub trait ColumnSelection: Debug + Clone {
    /// Returns an active column header, or `None` when no column is active.
    fn pick(&self, links: &Links) -> Option<NodeId>;
}

/// Knuth's "S heuristic": the active column with the fewest live cells.
///
/// Ties go to the column met first walking right from the root. A column with no cells is
/// returned as soon as it is seen, since nothing can beat it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinimumRemaining;

impl ColumnSelection for MinimumRemaining {
    fn pick(&self, links: &Links) -> Option<NodeId> {
        let mut best: Option<(NodeId, usize)> = None;
        for column in links.columns() {
            let size = links.size(column);
            if best.is_none_or(|(_, best_size)| size < best_size) {
                best = Some((column, size));
                if size == 0 {
                    break;
                }
            }
        }
        best.map(|(column, _)| column)
    }
}

/// The leftmost active column, regardless of size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Leftmost;

impl ColumnSelection for Leftmost {
    fn pick(&self, links: &Links) -> Option<NodeId> {
        links.columns().next()
    }
}

/// Runtime-selected column selection, for configurations chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSelectionImpls {
    /// See [`MinimumRemaining`].
    MinimumRemaining(MinimumRemaining),
    /// See [`Leftmost`].
    Leftmost(Leftmost),
}

impl Default for ColumnSelectionImpls {
    fn default() -> Self {
        Self::MinimumRemaining(MinimumRemaining)
    }
}

impl ColumnSelection for ColumnSelectionImpls {
    fn pick(&self, links: &Links) -> Option<NodeId> {
        match self {
            Self::MinimumRemaining(s) => s.pick(links),
            Self::Leftmost(s) => s.pick(links),
        }
    }
}

/// Names of the available column selection strategies.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum ColumnSelectionType {
    /// Fewest live cells first.
    #[default]
    MinimumRemaining,
    /// Leftmost active column first.
    Leftmost,
}

impl Display for ColumnSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinimumRemaining => write!(f, "minimum-remaining"),
            Self::Leftmost => write!(f, "leftmost"),
        }
    }
}

impl ColumnSelectionType {
    /// Converts the name into a concrete strategy.
    #[must_use]
    pub const fn to_impl(self) -> ColumnSelectionImpls {
        match self {
            Self::MinimumRemaining => ColumnSelectionImpls::MinimumRemaining(MinimumRemaining),
            Self::Leftmost => ColumnSelectionImpls::Leftmost(Leftmost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::builder::build;
    use crate::dlx::matrix::Matrix;

    fn links(rows: &[&[u8]]) -> Links {
        build(&Matrix::from_bytes(rows).unwrap())
    }

    #[test]
    fn test_minimum_remaining_picks_smallest() {
        let l = links(&[&[1, 1, 1], &[1, 0, 1], &[1, 0, 0]]);
        assert_eq!(MinimumRemaining.pick(&l), Some(Links::header(1)));
    }

    #[test]
    fn test_minimum_remaining_breaks_ties_leftmost() {
        let l = links(&[&[1, 1, 1], &[0, 1, 1], &[1, 0, 0]]);
        // all columns have two cells
        assert_eq!(MinimumRemaining.pick(&l), Some(Links::header(0)));
    }

    #[test]
    fn test_minimum_remaining_prefers_empty_column() {
        let l = links(&[&[1, 0, 1, 0], &[1, 0, 0, 1]]);
        assert_eq!(MinimumRemaining.pick(&l), Some(Links::header(1)));
    }

    #[test]
    fn test_minimum_remaining_skips_covered_columns() {
        let mut l = links(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 1]]);
        l.cover(Links::header(0));
        // column 1 loses row 0, leaving one cell
        assert_eq!(MinimumRemaining.pick(&l), Some(Links::header(1)));
        assert_eq!(l.size(Links::header(1)), 1);
    }

    #[test]
    fn test_leftmost() {
        let mut l = links(&[&[1, 1, 1], &[0, 0, 1]]);
        assert_eq!(Leftmost.pick(&l), Some(Links::header(0)));
        l.cover(Links::header(0));
        assert_eq!(Leftmost.pick(&l), Some(Links::header(1)));
    }

    #[test]
    fn test_none_when_all_covered() {
        let mut l = links(&[&[1]]);
        l.cover(Links::header(0));
        assert_eq!(MinimumRemaining.pick(&l), None);
        assert_eq!(Leftmost.pick(&l), None);
    }

    #[test]
    fn test_type_to_impl() {
        let l = links(&[&[1, 1], &[0, 1]]);
        assert_eq!(ColumnSelectionType::Leftmost.to_impl().pick(&l), Some(Links::header(0)));
        assert_eq!(
            ColumnSelectionType::MinimumRemaining.to_impl().pick(&l),
            Some(Links::header(0))
        );
        assert_eq!(ColumnSelectionType::default().to_string(), "minimum-remaining");
    }
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The toroidal Dancing Links structure and its two primitive moves, `cover` and `uncover`.
//!
//! Every cell lives in a single arena (`Vec<Node>`) and refers to its neighbours by index, so
//! the circular, quadruply linked lists need no shared ownership. The layout is fixed:
//!
//! ```text
//!   id 0            master header (root)
//!   ids 1..=n       column headers, column j has id j + 1
//!   ids n+1..       row cells, appended row by row in column order
//! ```
//!
//! The root only ever takes part in the horizontal list of headers. Headers point at
//! themselves through `column` and carry no row.
//!
//! Removing a node from a doubly linked list leaves its own links untouched, which is what lets
//! `uncover` put it back: as long as removals are undone in exactly the reverse order, every
//! neighbour a removed node still points at is back in place by the time it is restored.

use itertools::Itertools;
use std::fmt::{self, Display};

/// Index of a node in the arena.
pub type NodeId = usize;

/// The master header's id.
pub const ROOT: NodeId = 0;

/// One cell of the structure: a row cell, a column header or the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// Horizontal predecessor.
    pub left: NodeId,
    /// Horizontal successor.
    pub right: NodeId,
    /// Vertical predecessor.
    pub up: NodeId,
    /// Vertical successor.
    pub down: NodeId,
    /// Header of the column this node belongs to (itself for headers and the root).
    pub column: NodeId,
    /// Matrix row, `None` for headers and the root.
    pub row: Option<usize>,
}

impl Node {
    /// A node linked only to itself in both directions.
    #[must_use]
    pub const fn detached(id: NodeId, column: NodeId, row: Option<usize>) -> Self {
        Self {
            left: id,
            right: id,
            up: id,
            down: id,
            column,
            row,
        }
    }
}

/// The linked exact-cover structure.
///
/// Equality compares every link and every live count, so two values are equal exactly when
/// they are connected identically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Links {
    pub(super) nodes: Vec<Node>,
    /// Live cell count per header id; slot 0 belongs to the root and stays unused.
    pub(super) sizes: Vec<usize>,
    pub(super) num_columns: usize,
    pub(super) num_rows: usize,
}

impl Links {
    /// Total number of arena slots (root, headers and cells).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of columns the structure was built with.
    #[must_use]
    pub const fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Number of matrix rows the structure was built from, including empty ones.
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of row cells (set bits) in the structure.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.nodes.len().saturating_sub(1 + self.num_columns)
    }

    /// True once every column has been covered.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.right(ROOT) == ROOT
    }

    /// Read access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Right neighbour of `id`.
    #[must_use]
    pub fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id].right
    }

    /// Left neighbour of `id`.
    #[must_use]
    pub fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id].left
    }

    /// Upper neighbour of `id`.
    #[must_use]
    pub fn up(&self, id: NodeId) -> NodeId {
        self.nodes[id].up
    }

    /// Lower neighbour of `id`.
    #[must_use]
    pub fn down(&self, id: NodeId) -> NodeId {
        self.nodes[id].down
    }

    /// Column header of `id`.
    #[must_use]
    pub fn column_of(&self, id: NodeId) -> NodeId {
        self.nodes[id].column
    }

    /// Matrix row index of a row cell.
    #[must_use]
    pub fn row_of(&self, id: NodeId) -> Option<usize> {
        self.nodes[id].row
    }

    /// Live cell count of a column header.
    #[must_use]
    pub fn size(&self, column: NodeId) -> usize {
        self.sizes[column]
    }

    /// Header id of matrix column `index`.
    #[must_use]
    pub const fn header(index: usize) -> NodeId {
        index + 1
    }

    /// Matrix column index of a header id.
    #[must_use]
    pub const fn column_index(header: NodeId) -> usize {
        header - 1
    }

    /// Whether `id` is a column header (not the root, not a row cell).
    #[must_use]
    pub const fn is_header(&self, id: NodeId) -> bool {
        id != ROOT && id <= self.num_columns
    }

    /// Walks the list starting after `start` in the direction picked by `step`, stopping
    /// before `start` comes round again.
    fn walk(&self, start: NodeId, step: fn(&Node) -> NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(step(&self.nodes[start])), move |&id| {
            Some(step(&self.nodes[id]))
        })
        .take_while(move |&id| id != start)
    }

    /// Active column headers, left to right.
    pub fn columns(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(ROOT, |n| n.right)
    }

    /// Live cells of `column`, top to bottom.
    pub fn column_cells(&self, column: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(column, |n| n.down)
    }

    /// The other cells of `cell`'s row, left to right starting just after `cell`.
    pub fn row_cells(&self, cell: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(cell, |n| n.right)
    }

    /// Matrix column indices of the active columns, left to right.
    #[must_use]
    pub fn active_columns(&self) -> Vec<usize> {
        self.columns().map(Self::column_index).collect_vec()
    }

    /// Splices `id` out of its column; its own `up`/`down` are left pointing at the old
    /// neighbours.
    fn unlink_vertical(&mut self, id: NodeId) {
        let Node { up, down, column, .. } = self.nodes[id];
        self.nodes[up].down = down;
        self.nodes[down].up = up;
        self.sizes[column] -= 1;
    }

    /// Puts `id` back between the neighbours it still points at.
    fn relink_vertical(&mut self, id: NodeId) {
        let Node { up, down, column, .. } = self.nodes[id];
        self.nodes[up].down = id;
        self.nodes[down].up = id;
        self.sizes[column] += 1;
    }

    /// Covers `column`: removes its header from the active list and every row that intersects
    /// it from all other columns.
    ///
    /// The column's own vertical list and the rows' horizontal lists are left intact, so
    /// [`Links::uncover`] can walk them again. Returns the number of links updated.
    pub fn cover(&mut self, column: NodeId) -> usize {
        debug_assert!(self.is_header(column), "not a column header: {column}");

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut updates = 1;
        let mut row = self.down(column);
        while row != column {
            let mut cell = self.right(row);
            while cell != row {
                self.unlink_vertical(cell);
                updates += 1;
                cell = self.right(cell);
            }
            row = self.down(row);
        }
        updates
    }

    /// Undoes [`Links::cover`] on the same column.
    ///
    /// Rows are visited bottom to top and cells right to left, the exact reverse of `cover`,
    /// and the header is restored last.
    pub fn uncover(&mut self, column: NodeId) {
        debug_assert!(self.is_header(column), "not a column header: {column}");

        let mut row = self.up(column);
        while row != column {
            let mut cell = self.left(row);
            while cell != row {
                self.relink_vertical(cell);
                cell = self.left(cell);
            }
            row = self.up(row);
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = column;
        self.nodes[right].left = column;
    }

    /// Covers every other column touched by `cell`'s row, left to right starting just after
    /// `cell`. Returns the number of links updated.
    pub fn cover_row(&mut self, cell: NodeId) -> usize {
        let mut updates = 0;
        let mut other = self.right(cell);
        while other != cell {
            updates += self.cover(self.column_of(other));
            other = self.right(other);
        }
        updates
    }

    /// Undoes [`Links::cover_row`] by uncovering the same columns right to left.
    pub fn uncover_row(&mut self, cell: NodeId) {
        let mut other = self.left(cell);
        while other != cell {
            self.uncover(self.column_of(other));
            other = self.left(other);
        }
    }

    /// Checks every structural invariant reachable from the root.
    ///
    /// Walks the active header list and each active column, verifying doubly linked symmetry
    /// in both directions, column membership, row tags and live counts. Row lists are checked
    /// for symmetry too, since covering never touches them.
    ///
    /// # Errors
    ///
    /// A description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let limit = self.nodes.len();
        let root = &self.nodes[ROOT];
        if root.row.is_some() || root.column != ROOT {
            return Err("root must not belong to a row or column".to_string());
        }
        if root.up != ROOT || root.down != ROOT {
            return Err("root must not be linked vertically".to_string());
        }

        let mut seen_columns = 0;
        let mut prev = ROOT;
        let mut column = self.right(ROOT);
        while column != ROOT {
            seen_columns += 1;
            if seen_columns > self.num_columns {
                return Err("header list does not return to the root".to_string());
            }
            if !self.is_header(column) {
                return Err(format!("node {column} in the header list is not a header"));
            }
            if self.left(column) != prev || self.right(prev) != column {
                return Err(format!("header {column} is not symmetrically linked"));
            }
            self.check_column(column, limit)?;
            prev = column;
            column = self.right(column);
        }
        if self.left(ROOT) != prev {
            return Err("root's left link does not close the header list".to_string());
        }
        Ok(())
    }

    fn check_column(&self, column: NodeId, limit: usize) -> Result<(), String> {
        let mut count = 0;
        let mut prev = column;
        let mut cell = self.down(column);
        while cell != column {
            count += 1;
            if count > limit {
                return Err(format!("column {column} does not return to its header"));
            }
            let node = &self.nodes[cell];
            if node.column != column {
                return Err(format!("cell {cell} is linked into foreign column {column}"));
            }
            if node.row.is_none() {
                return Err(format!("cell {cell} in column {column} has no row"));
            }
            if node.up != prev || self.down(prev) != cell {
                return Err(format!("cell {cell} is not symmetrically linked in column {column}"));
            }
            if self.left(node.right) != cell || self.right(node.left) != cell {
                return Err(format!("cell {cell} is not symmetrically linked in its row"));
            }
            if self.row_of(node.right) != node.row {
                return Err(format!("cell {cell} shares a row list with another row"));
            }
            prev = cell;
            cell = node.down;
        }
        if self.up(column) != prev {
            return Err(format!("column {column}'s up link does not close the list"));
        }
        if count != self.sizes[column] {
            return Err(format!(
                "column {column} holds {count} cells but records {}",
                self.sizes[column]
            ));
        }
        Ok(())
    }
}

impl Display for Links {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "columns={} rows={} cells={} active=[{}]",
            self.num_columns,
            self.num_rows,
            self.num_cells(),
            self.columns()
                .map(|c| format!("{}:{}", Self::column_index(c), self.size(c)))
                .join(", ")
        )
    }
}

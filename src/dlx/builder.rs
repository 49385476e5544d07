//! Builds the toroidal [`Links`] structure from a validated [`Matrix`].

use crate::dlx::links::{Links, Node, ROOT};
use crate::dlx::matrix::Matrix;
use tracing::debug;

/// Builds the linked structure for `matrix`.
///
/// Headers are spliced in column order, so walking right from the root visits columns left to
/// right. Each set bit becomes a cell appended to the bottom of its column and to the end of
/// its row's circular list. Rows without set bits produce no cells.
///
/// The shape checks live in [`Matrix`]'s constructors, so building cannot fail.
#[must_use]
pub fn build(matrix: &Matrix) -> Links {
    let num_columns = matrix.num_columns();
    let mut links = Links {
        nodes: Vec::with_capacity(1 + num_columns + matrix.num_ones()),
        sizes: vec![0; num_columns + 1],
        num_columns,
        num_rows: matrix.num_rows(),
    };

    links.nodes.push(Node::detached(ROOT, ROOT, None));
    for index in 0..num_columns {
        let header = Links::header(index);
        links.nodes.push(Node::detached(header, header, None));
        insert_before(&mut links, ROOT, header);
    }

    for row in 0..matrix.num_rows() {
        let mut first = None;
        for index in matrix.ones(row) {
            let header = Links::header(index);
            let cell = links.nodes.len();
            links.nodes.push(Node::detached(cell, header, Some(row)));

            let bottom = links.nodes[header].up;
            links.nodes[cell].up = bottom;
            links.nodes[cell].down = header;
            links.nodes[bottom].down = cell;
            links.nodes[header].up = cell;
            links.sizes[header] += 1;

            match first {
                None => first = Some(cell),
                Some(head) => insert_before(&mut links, head, cell),
            }
        }
    }

    debug!(
        rows = links.num_rows,
        columns = num_columns,
        cells = links.num_cells(),
        "built dancing links"
    );
    links
}

/// Splices `node` into a horizontal list just before `anchor`, i.e. at the end of the circle.
fn insert_before(links: &mut Links, anchor: usize, node: usize) {
    let last = links.nodes[anchor].left;
    links.nodes[node].left = last;
    links.nodes[node].right = anchor;
    links.nodes[last].right = node;
    links.nodes[anchor].left = node;
}

impl From<&Matrix> for Links {
    fn from(matrix: &Matrix) -> Self {
        build(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> Matrix {
        Matrix::from_bytes(rows).unwrap()
    }

    #[test]
    fn test_headers_in_column_order() {
        let links = build(&matrix(&[&[1, 0, 1, 1]]));
        assert_eq!(links.active_columns(), vec![0, 1, 2, 3]);
        assert_eq!(links.left(ROOT), Links::header(3));
        assert_eq!(links.right(Links::header(3)), ROOT);
        links.check_invariants().unwrap();
    }

    #[test]
    fn test_cells_appended_to_bottom_in_row_order() {
        let links = build(&matrix(&[&[1, 1], &[0, 1], &[1, 1]]));
        let c1 = Links::header(1);
        let rows: Vec<_> = links
            .column_cells(c1)
            .map(|c| links.row_of(c).unwrap())
            .collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(links.size(c1), 3);
        assert_eq!(links.size(Links::header(0)), 2);
    }

    #[test]
    fn test_row_list_is_circular_in_column_order() {
        let links = build(&matrix(&[&[0, 1, 1, 0, 1]]));
        let first = links.down(Links::header(1));
        let columns: Vec<_> = std::iter::once(first)
            .chain(links.row_cells(first))
            .map(|c| Links::column_index(links.column_of(c)))
            .collect();
        assert_eq!(columns, vec![1, 2, 4]);
        let last = links.left(first);
        assert_eq!(links.right(last), first);
        assert_eq!(Links::column_index(links.column_of(last)), 4);
    }

    #[test]
    fn test_empty_row_has_no_cells() {
        let links = build(&matrix(&[&[1, 0], &[0, 0], &[0, 1]]));
        assert_eq!(links.num_rows(), 3);
        assert_eq!(links.num_cells(), 2);
        let rows: Vec<_> = links
            .columns()
            .flat_map(|c| links.column_cells(c))
            .map(|c| links.row_of(c).unwrap())
            .collect();
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn test_empty_column_has_self_linked_header() {
        let links = build(&matrix(&[&[1, 0, 1]]));
        let c1 = Links::header(1);
        assert_eq!(links.size(c1), 0);
        assert_eq!(links.up(c1), c1);
        assert_eq!(links.down(c1), c1);
    }

    #[test]
    fn test_headers_and_root_carry_no_row() {
        let links = build(&matrix(&[&[1, 1]]));
        assert_eq!(links.row_of(ROOT), None);
        assert_eq!(links.column_of(ROOT), ROOT);
        for c in links.columns() {
            assert_eq!(links.row_of(c), None);
            assert_eq!(links.column_of(c), c);
        }
    }

    #[test]
    fn test_building_twice_yields_equal_independent_structures() {
        let m = matrix(&[&[1, 0, 1], &[0, 1, 0], &[1, 1, 0]]);
        let mut first = build(&m);
        let second = Links::from(&m);
        assert_eq!(first, second);

        first.cover(Links::header(0));
        assert_ne!(first, second);
        second.check_invariants().unwrap();
        assert_eq!(second.active_columns(), vec![0, 1, 2]);
    }
}

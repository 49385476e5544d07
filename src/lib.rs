#![deny(missing_docs)]
//! This crate solves exact cover problems with Knuth's Dancing Links and reduces puzzles to them.

/// The `dlx` module implements the Dancing Links structure and the Algorithm X search over it.
pub mod dlx;

/// The `sudoku` module reduces Sudoku puzzles of size 4, 9, 16 and 25 to exact cover.
pub mod sudoku;

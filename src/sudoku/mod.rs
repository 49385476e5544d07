#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku puzzles expressed as exact cover problems.

/// The `solver` module builds the exact cover matrix of a puzzle and decodes covers into boards.
pub mod solver;

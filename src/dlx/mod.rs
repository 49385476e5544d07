#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exact cover via Knuth's Dancing Links.
//!
//! The pipeline is strictly one way: a validated [`matrix::Matrix`] is turned into the linked
//! [`links::Links`] structure by [`builder::build`], and a [`solver::Solver`] searches that
//! structure for the first exact cover.
//!
//! ```
//! use dlx_solver::dlx::matrix::Matrix;
//! use dlx_solver::dlx::solver::solve;
//!
//! let matrix = Matrix::from_bytes(&[
//!     [1u8, 0, 0, 1, 0, 0, 1],
//!     [1, 0, 0, 1, 0, 0, 0],
//!     [0, 0, 0, 1, 1, 0, 1],
//!     [0, 0, 1, 0, 1, 1, 0],
//!     [0, 1, 1, 0, 0, 1, 1],
//!     [0, 1, 0, 0, 0, 0, 1],
//! ])?;
//! let solution = solve(&matrix).expect("the matrix has an exact cover");
//! assert_eq!(solution.rows(), &[1, 3, 5]);
//! # Ok::<(), dlx_solver::dlx::matrix::MatrixError>(())
//! ```

pub mod builder;
pub mod column_selection;
pub mod generate;
pub mod iterative;
pub mod links;
pub mod matrix;
pub mod parse;
pub mod recursive;
pub mod solution;
pub mod solver;

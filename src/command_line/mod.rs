//! Command line handling for the `dlx` binary.

/// The `cli` module defines the arguments and the solve and report routines behind each command.
pub(crate) mod cli;

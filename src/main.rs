//! # dlx
//!
//! `dlx` is a command-line exact cover solver built on Knuth's Dancing Links.
//!
//! ## Usage
//!
//! ```sh
//! dlx [OPTIONS] [PATH] | dlx <SUBCOMMAND>
//! ```
//!
//! A bare `PATH` is either a matrix file or a directory; for a directory every `.matrix`,
//! `.txt` and `.sudoku` file below it is solved in file name order.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a 0/1 matrix file.
//!     ```sh
//!     dlx file --path problem.matrix
//!     ```
//! 2.  **`text`**: Solve a matrix given inline.
//!     ```sh
//!     dlx text --input "1001\n0110"
//!     ```
//! 3.  **`sudoku`**: Solve a Sudoku of size 4, 9, 16 or 25.
//!     ```sh
//!     dlx sudoku --path puzzle.sudoku
//!     ```
//! 4.  **`random`**: Solve a random instance with a planted cover.
//!     ```sh
//!     dlx random --columns 64 --rows 200 --seed 7
//!     ```
//! 5.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Debug logging on stderr (default: `false`).
//! -   `-v, --verify <BOOL>`: Verify the solution (default: `true`).
//! -   `-s, --stats <BOOL>`: Print statistics (default: `true`).
//! -   `-p, --print-solution`: Print the selected rows (default: `false`).
//! -   `--sorted`: Print the rows in ascending order.
//! -   `--solver <recursive|iterative>`: Search driver (default: `recursive`).
//! -   `--column-selection <minimum-remaining|leftmost>`: Column choice (default:
//!     `minimum-remaining`).

use crate::command_line::cli::{
    solve_dir, solve_file, solve_random, solve_sudoku, solve_text, Cli, Commands,
};
use clap::{CommandFactory, Parser};
use dlx_solver::dlx::generate::Planted;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug_enabled() {
        Level::DEBUG
    } else {
        Level::WARN
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Sudoku { path, common }) => solve_sudoku(&path, &common),
        Some(Commands::Random {
            columns,
            rows,
            density,
            max_group,
            seed,
            common,
        }) => {
            let params = Planted {
                columns,
                extra_rows: rows,
                density,
                max_group,
                seed,
            };
            solve_random(&params, &common)
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => solve_dir(&path, &cli.common),
            Some(path) if path.extension().is_some_and(|ext| ext == "sudoku") => {
                solve_sudoku(&path, &cli.common)
            }
            Some(path) => solve_file(&path, &cli.common),
            None => {
                Cli::command()
                    .print_help()
                    .map_err(|e| format!("Failed to print help: {e}"))?;
                Ok(())
            }
        },
    }
}

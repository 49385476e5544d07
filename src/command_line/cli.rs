#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand};
use dlx_solver::dlx::builder::build;
use dlx_solver::dlx::column_selection::ColumnSelectionType;
use dlx_solver::dlx::generate::Planted;
use dlx_solver::dlx::matrix::Matrix;
use dlx_solver::dlx::parse::{parse_file, parse_str};
use dlx_solver::dlx::solution::Solution;
use dlx_solver::dlx::solver::{DynamicConfig, SearchStats, Solver, SolverType};
use dlx_solver::sudoku::solver::parse_sudoku_file;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{debug, info, warn};

/// Defines the command-line interface of the exact cover solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dlx",
    version,
    about = "An exact cover solver using Dancing Links",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// A matrix file to solve, or a directory whose `.matrix`, `.txt` and `.sudoku` files are
    /// solved one after another.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// Whether debug logging was requested, either globally or for the subcommand.
    pub(crate) fn debug_enabled(&self) -> bool {
        self.common.debug
            || match &self.command {
                Some(
                    Commands::File { common, .. }
                    | Commands::Text { common, .. }
                    | Commands::Sudoku { common, .. }
                    | Commands::Random { common, .. },
                ) => common.debug,
                Some(Commands::Completions { .. }) | None => false,
            }
    }
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a 0/1 matrix file.
    File {
        /// Path to the matrix file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a matrix given as text, one row per line (a literal `\n` also separates rows).
    Text {
        /// Matrix rows, e.g. "1001\n0110".
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle by reducing it to exact cover.
    Sudoku {
        /// Path to the Sudoku file, see `sudoku::solver::parse_sudoku_str` for the format.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a random instance with a planted exact cover.
    Random {
        /// Number of columns.
        #[arg(long, default_value_t = 32)]
        columns: usize,

        /// Number of distractor rows added on top of the planted cover.
        #[arg(long, default_value_t = 64)]
        rows: usize,

        /// Probability of each entry of a distractor row being set.
        #[arg(long, default_value_t = 0.2)]
        density: f64,

        /// Largest number of columns a planted row may cover.
        #[arg(long, default_value_t = 4)]
        max_group: usize,

        /// Seed of the random generator.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging on stderr.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check that a found solution really is an exact cover of the input.
    #[arg(short, long, action = ArgAction::Set, default_value_t = true)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, action = ArgAction::Set, default_value_t = true)]
    pub(crate) stats: bool,

    /// Print the selected rows.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Print the selected rows in ascending order instead of selection order.
    #[arg(long, default_value_t = false)]
    pub(crate) sorted: bool,

    /// Search driver.
    #[arg(long, value_enum, default_value_t = SolverType::Recursive)]
    pub(crate) solver: SolverType,

    /// Column selection strategy.
    #[arg(long, value_enum, default_value_t = ColumnSelectionType::MinimumRemaining)]
    pub(crate) column_selection: ColumnSelectionType,
}

/// Result of one run of the solver.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) solution: Option<Solution>,
    pub(crate) build_time: Duration,
    pub(crate) search_time: Duration,
    pub(crate) stats: SearchStats,
}

/// Solves every matrix and Sudoku file below `path`.
///
/// Files ending in `.matrix` or `.txt` are read as matrices, `.sudoku` files as puzzles; anything
/// else is skipped.
///
/// # Errors
///
/// If `path` is not a directory, or the first file that fails to parse or verify.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();
        match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("sudoku") => solve_sudoku(file_path, common)?,
            Some("matrix" | "txt") => solve_file(file_path, common)?,
            _ => info!(path = %file_path.display(), "skipping file"),
        }
    }

    Ok(())
}

/// Parses and solves a single matrix file.
///
/// # Errors
///
/// If the file cannot be parsed or the solution fails verification.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let matrix =
        parse_file(path).map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    solve_and_report(&matrix, common, Some(path), parse_time).map(|_| ())
}

/// Solves a matrix given on the command line.
///
/// # Errors
///
/// If the text is not a valid matrix or the solution fails verification.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let matrix = parse_str(&normalise_text(input)).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(&matrix, common, None, parse_time).map(|_| ())
}

/// Turns literal `\n` sequences, as typed in a shell, into line breaks.
pub(crate) fn normalise_text(input: &str) -> String {
    input.replace("\\n", "\n")
}

/// Checks `solution` against `matrix`.
///
/// # Errors
///
/// If the rows do not form an exact cover of `matrix`.
pub(crate) fn verify_solution(matrix: &Matrix, solution: Option<&Solution>) -> Result<(), String> {
    match solution {
        Some(solution) => {
            let ok = solution.verify(matrix);
            println!("Verified: {ok:?}");
            if ok {
                Ok(())
            } else {
                Err(format!("Solution {solution} failed verification"))
            }
        }
        None => Ok(()),
    }
}

/// Builds the linked structure for `matrix` and runs the solver selected in `common`.
pub(crate) fn solve(matrix: &Matrix, label: Option<&Path>, common: &CommonOptions) -> Outcome {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    debug!(
        rows = matrix.num_rows(),
        columns = matrix.num_columns(),
        ones = matrix.num_ones(),
        solver = %common.solver,
        column_selection = %common.column_selection,
        "solving matrix"
    );

    let time = Instant::now();
    let links = build(matrix);
    let build_time = time.elapsed();

    let time = Instant::now();
    let mut solver = common
        .solver
        .to_impl::<DynamicConfig>(links, common.column_selection.to_impl());
    let solution = solver.solve();
    let search_time = time.elapsed();

    debug!(solution = ?solution, time = ?search_time, "search finished");

    Outcome {
        solution,
        build_time,
        search_time,
        stats: solver.stats(),
    }
}

/// Solves `matrix`, then verifies and reports as configured in `common`.
///
/// # Errors
///
/// If verification is enabled and the solution is not an exact cover.
pub(crate) fn solve_and_report(
    matrix: &Matrix,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<Option<Solution>, String> {
    let outcome = solve(matrix, label, common);

    if common.verify {
        verify_solution(matrix, outcome.solution.as_ref())?;
    }

    if common.stats {
        print_stats(parse_time, matrix, &outcome, memory_usage());
    }

    if common.print_solution {
        if let Some(solution) = &outcome.solution {
            if common.sorted {
                println!("Solution: [{}]", solution.sorted().iter().join(", "));
            } else {
                println!("Solution: {solution}");
            }
        }
    }

    if outcome.solution.is_some() {
        println!("\nEXACT COVER FOUND");
    } else {
        println!("\nNO EXACT COVER");
    }

    Ok(outcome.solution)
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    matrix: &Matrix,
    outcome: &Outcome,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = outcome.search_time.as_secs_f64();
    let s = &outcome.stats;
    let cells = matrix.num_rows() * matrix.num_columns();
    let density = if cells > 0 {
        matrix.num_ones() as f64 / cells as f64
    } else {
        0.0
    };

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Rows", matrix.num_rows());
    stat_line("Columns", matrix.num_columns());
    stat_line("Ones", matrix.num_ones());
    stat_line("Density", format!("{density:.4}"));

    println!("========================[ Search Statistics ]========================");
    stat_line("Build time (s)", format!("{:.3}", outcome.build_time.as_secs_f64()));
    stat_line_with_rate("Nodes", s.nodes, elapsed_secs);
    stat_line_with_rate("Rows tried", s.rows_tried, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Link updates", s.updates, elapsed_secs);
    stat_line("Dead ends", s.dead_ends);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

/// Solve a sudoku file.
///
/// # Errors
///
/// If the file cannot be read or parsed, or the decoded grid is not a valid solution.
pub(crate) fn solve_sudoku(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = Instant::now();
    let sudoku = parse_sudoku_file(path)
        .map_err(|e| format!("Error parsing Sudoku file {}: {e}", path.display()))?;
    println!("Parsed Sudoku:\n{sudoku}");

    let cover = sudoku.to_exact_cover().map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    let solution = solve_and_report(&cover.matrix, common, Some(path), parse_time)?;

    if let Some(solution) = solution {
        let board = cover.decode(&solution);
        if common.verify && !board.is_complete_and_valid() {
            return Err(format!("Decoded grid is not a valid Sudoku:\n{board}"));
        }
        println!("Solution:\n{board}");
    } else {
        println!("No solution found");
    }

    Ok(())
}

/// Generates and solves a planted random instance.
///
/// # Errors
///
/// If the parameters describe no matrix or the solution fails verification.
pub(crate) fn solve_random(params: &Planted, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let instance = params.generate().map_err(|e| e.to_string())?;
    let generate_time = time.elapsed();

    info!(seed = params.seed, planted = ?instance.cover, "generated instance");

    let solution = solve_and_report(&instance.matrix, common, None, generate_time)?;
    if solution.is_none() {
        warn!(seed = params.seed, "planted instance reported without a cover");
        return Err("No exact cover found for an instance with a planted cover".to_string());
    }

    Ok(())
}

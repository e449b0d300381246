#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Argument parsing and the solve drivers.
//!
//! The binary takes one positional target: a formula file, or any token
//! containing `all` (case-insensitive) to process every `*.cnf` in the
//! working directory, one after the other. Formulas are independent;
//! nothing is shared between them.

use crate::command_line::report;
use crate::sat::dimacs::parse_file;
use crate::sat::solver::{SolveReport, Solver};
use anyhow::Context;
use clap::{Args, Parser};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// The command-line interface of the solver.
#[derive(Parser, Debug)]
#[command(name = "nanosat", version, about = "An experimental 3-SAT solver")]
pub(crate) struct Cli {
    /// Formula file in DIMACS CNF, or a token containing `all` to
    /// process every *.cnf in the working directory.
    pub target: String,

    /// Verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Options shared by the single-file and batch drivers.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Options shared by the single-file and batch drivers.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Try all 2n starting literals instead of stopping at the first.
    #[arg(short, long, default_value_t = false)]
    pub exhaustive: bool,

    /// Await user input on any UNSAT result.
    #[arg(long, default_value_t = false)]
    pub stop_on_fail: bool,

    /// Record per-iteration stats to a per-run trace CSV.
    #[arg(short, long, default_value_t = false)]
    pub record: bool,

    /// Print the positive-polarity solution to the console.
    #[arg(short = 's', long, default_value_t = false)]
    pub print_solution: bool,
}

/// Dispatches to the batch or single-file driver.
pub(crate) fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.target.to_lowercase().contains("all") {
        solve_all(&cli.common)
    } else {
        solve_file(Path::new(&cli.target), &cli.common)
    }
}

/// Solves every `*.cnf` in the working directory, sequentially. A
/// malformed formula aborts only itself; the batch continues.
pub(crate) fn solve_all(common: &CommonOptions) -> anyhow::Result<()> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(".")
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "cnf"))
        .collect();
    paths.sort();

    tracing::info!(count = paths.len(), "batch over working directory");

    for path in &paths {
        if let Err(error) = solve_file(path, common) {
            eprintln!("{}: {error:#}", path.display());
        }
    }
    Ok(())
}

/// Parses one formula, solves it and writes every report surface.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    let cnf = parse_file(path).with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(
        file = %path.display(),
        n = cnf.num_vars,
        m = cnf.len(),
        "formula parsed"
    );

    let mut solver = Solver::new(cnf);
    let solve_report = if common.exhaustive {
        solver.solve_exhaustive()
    } else {
        solver.solve()
    };

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

    report::print_console(&file_name, solver.cnf(), &solve_report, common.exhaustive);

    if common.print_solution {
        if let Some(solution) = solve_report.solution() {
            println!("v {solution}");
        }
    }

    // Report files are best-effort; a failed write never aborts the run.
    if let Err(error) = report::append_results_csv(&file_name, solver.cnf(), &solve_report) {
        tracing::warn!(%error, "could not append to results.csv");
    }
    if let Err(error) = report::write_solution_file(&file_name, solver.cnf(), &solve_report) {
        tracing::warn!(%error, "could not write solution file");
    }
    if common.record {
        if let Err(error) = report::write_trace_csvs(&file_name, solver.cnf(), &solve_report) {
            tracing::warn!(%error, "could not write trace CSV");
        }
    }

    if common.stop_on_fail && !solve_report.satisfiable() {
        pause(&solve_report);
    }

    Ok(())
}

/// Blocks for a line of input after an UNSAT result.
fn pause(report: &SolveReport) {
    println!(
        "UNSAT after {} run(s); press enter to continue",
        report.runs.len()
    );
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

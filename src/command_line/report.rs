#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Report surfaces: the console table, the accumulating `results.csv`,
//! per-formula solution files and the optional per-run trace CSVs.

use crate::sat::cnf::Cnf;
use crate::sat::solver::{RunReport, SolveReport};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory holding the per-formula solution files and trace CSVs.
const RESULTS_DIR: &str = "results_dir";

/// Accumulating one-row-per-run CSV.
const RESULTS_CSV: &str = "results.csv";

/// Prints one table line per run, plus a min/max order summary in
/// exhaustive mode.
pub(crate) fn print_console(file_name: &str, cnf: &Cnf, report: &SolveReport, exhaustive: bool) {
    println!("{file_name}: n={} m={}", cnf.num_vars, cnf.len());
    println!(
        "| {:>6} | {:>10} | {:>10} | {:>8} | {:<7} |",
        "Base", "Order", "Time(ms)", "MDB", "Verdict"
    );
    for run in &report.runs {
        println!(
            "| {:>6} | {:>10.4} | {:>10.3} | {:>8} | {:<7} |",
            run.base,
            run.order,
            run.elapsed.as_secs_f64() * 1000.0,
            run.mdb_size,
            if run.satisfiable { "SAT" } else { "NON-SAT" },
        );
    }
    if exhaustive {
        println!(
            "order: min={:.4} max={:.4}",
            report.min_order(),
            report.max_order()
        );
    }
}

/// Appends one row per run to `results.csv`, writing the header first
/// when the file does not exist yet.
pub(crate) fn append_results_csv(
    file_name: &str,
    cnf: &Cnf,
    report: &SolveReport,
) -> io::Result<()> {
    let fresh = !Path::new(RESULTS_CSV).exists();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(RESULTS_CSV)?;

    if fresh {
        writeln!(
            file,
            "FileName,n,m,BaseLiteral,CPUms,ComplexityOrder,TotalWork,MainLoopOrder,\
             WorkPerLoop,GetOppUnitsCalls,GetUnitsCalls,FindUnitsCalls,Solution"
        )?;
    }
    for run in &report.runs {
        writeln!(file, "{}", results_row(file_name, cnf, run))?;
    }
    Ok(())
}

fn results_row(file_name: &str, cnf: &Cnf, run: &RunReport) -> String {
    let solution = run
        .solution
        .as_ref()
        .map_or_else(String::new, ToString::to_string);
    format!(
        "{},{},{},{},{:.3},{:.4},{},{:.4},{:.2},{},{},{},{}",
        file_name,
        cnf.num_vars,
        cnf.len(),
        run.base,
        run.elapsed.as_secs_f64() * 1000.0,
        run.order,
        run.stats.work,
        run.stats.main_loop_order(cnf.num_vars),
        run.stats.work_per_loop(),
        run.stats.get_opp_units_calls,
        run.stats.get_units_calls,
        run.stats.find_units_calls,
        solution,
    )
}

/// Writes `results_dir/<stem>.txt`: on SAT the clause list with the
/// satisfying literal rotated into column `a` plus a runtime footer, on
/// UNSAT a single `NON SAT` line.
pub(crate) fn write_solution_file(
    file_name: &str,
    cnf: &Cnf,
    report: &SolveReport,
) -> io::Result<()> {
    fs::create_dir_all(RESULTS_DIR)?;
    let path = results_path(file_name, "txt");

    let total_ms: f64 = report
        .runs
        .iter()
        .map(|run| run.elapsed.as_secs_f64() * 1000.0)
        .sum();

    let body = report.solution().map_or_else(
        || format!("NON SAT,{},{},{}\n", file_name, cnf.num_vars, cnf.len()),
        |solution| {
            let mut text = String::new();
            for clause in cnf.iter() {
                let witness = clause
                    .iter()
                    .find(|&lit| solution.contains(lit))
                    .unwrap_or(clause.a);
                text.push_str(&clause.rotated_to_front(witness).to_string());
                text.push('\n');
            }
            text.push_str(&format!("runtime: {total_ms:.3} ms\n"));
            text
        },
    );

    fs::write(path, body)
}

/// Writes `results_dir/<stem>_<base>_trace.csv` for every recorded
/// run: one row per main-loop iteration.
pub(crate) fn write_trace_csvs(
    file_name: &str,
    cnf: &Cnf,
    report: &SolveReport,
) -> io::Result<()> {
    fs::create_dir_all(RESULTS_DIR)?;
    let codec = cnf.codec();

    for run in &report.runs {
        let path = results_path(file_name, &format!("{}_trace.csv", run.base));
        let mut file = fs::File::create(path)?;
        writeln!(file, "Iteration,LambdaSize,Candidate,Front")?;
        for (iteration, lambda_size) in run.stats.lambda_history.iter().enumerate() {
            writeln!(
                file,
                "{},{},{},{}",
                iteration + 1,
                lambda_size,
                codec.decode(run.stats.candidate_history[iteration]),
                codec.decode(run.stats.front_history[iteration]),
            )?;
        }
    }
    Ok(())
}

fn results_path(file_name: &str, suffix: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned());
    let separator = if suffix == "txt" { "." } else { "_" };
    PathBuf::from(RESULTS_DIR).join(format!("{stem}{separator}{suffix}"))
}

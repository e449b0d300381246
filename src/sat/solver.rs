#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The multi-root driver above the engine.
//!
//! The driver cycles candidate starting literals `1..=2n`, one timed
//! engine run per root. The default mode stops at the first SAT run;
//! exhaustive mode keeps going and reports every root. Nothing is
//! shared between runs: the engine resets its lambda, headers, memo
//! table and counters each time.

use crate::sat::cnf::Cnf;
use crate::sat::engine::{Engine, RunOutcome};
use crate::sat::literal::Lit;
use crate::sat::stats::SearchStats;
use itertools::Itertools;
use std::fmt;
use std::time::{Duration, Instant};

/// A complete truth assignment, decoded to signed literals and sorted
/// by variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution(Vec<i32>);

impl Solution {
    /// Wraps a decoded assignment.
    #[must_use]
    pub fn new(mut literals: Vec<i32>) -> Self {
        literals.sort_unstable_by_key(|lit| lit.unsigned_abs());
        Self(literals)
    }

    /// Iterates the signed literals in variable order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Membership test for a signed literal.
    #[must_use]
    pub fn contains(&self, literal: i32) -> bool {
        self.0.contains(&literal)
    }

    /// The positive-polarity literals of the assignment.
    pub fn positives(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().filter(|&lit| lit > 0)
    }

    /// The number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Solution {
    /// Prints the positive-polarity literals, space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.positives().join(" "))
    }
}

/// One engine run, timed and decoded for reporting.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The starting literal, in decoded signed form.
    pub base: i32,
    /// Whether this run found a certified model.
    pub satisfiable: bool,
    /// The model, when found.
    pub solution: Option<Solution>,
    /// Wall time of the run.
    pub elapsed: Duration,
    /// Distinct states in the memo table at the end of the run.
    pub mdb_size: usize,
    /// The empirical complexity order `log_n(W)`.
    pub order: f64,
    /// The run's raw counters and history.
    pub stats: SearchStats,
}

/// The outcome of solving one formula: one report per attempted root.
#[derive(Debug, Clone, Default)]
pub struct SolveReport {
    /// Reports, in root order.
    pub runs: Vec<RunReport>,
}

impl SolveReport {
    /// `true` when any run found a model.
    #[must_use]
    pub fn satisfiable(&self) -> bool {
        self.runs.iter().any(|run| run.satisfiable)
    }

    /// The first model found, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.runs.iter().find_map(|run| run.solution.as_ref())
    }

    /// The smallest complexity order over all runs.
    #[must_use]
    pub fn min_order(&self) -> f64 {
        self.runs
            .iter()
            .map(|run| run.order)
            .fold(f64::INFINITY, f64::min)
    }

    /// The largest complexity order over all runs.
    #[must_use]
    pub fn max_order(&self) -> f64 {
        self.runs
            .iter()
            .map(|run| run.order)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Drives engine runs over candidate starting literals.
#[derive(Debug, Clone)]
pub struct Solver {
    engine: Engine,
}

impl Solver {
    /// Creates a solver for one formula.
    #[must_use]
    pub fn new(cnf: Cnf) -> Self {
        Self {
            engine: Engine::new(cnf),
        }
    }

    /// The formula under search.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        self.engine.cnf()
    }

    /// Cycles through starting literals, stopping at the first run
    /// that finds a model. All `2n` roots failing means UNSAT.
    pub fn solve(&mut self) -> SolveReport {
        let roots: Vec<Lit> = self.engine.codec().lits().collect();
        let mut runs = Vec::new();
        for root in roots {
            let report = self.run_from(root);
            let satisfiable = report.satisfiable;
            runs.push(report);
            if satisfiable {
                break;
            }
        }
        SolveReport { runs }
    }

    /// Runs the engine once from a caller-chosen starting literal.
    pub fn solve_from(&mut self, start: Lit) -> SolveReport {
        let report = self.run_from(start);
        SolveReport { runs: vec![report] }
    }

    /// Runs the engine from every literal in `1..=2n`.
    pub fn solve_exhaustive(&mut self) -> SolveReport {
        let roots: Vec<Lit> = self.engine.codec().lits().collect();
        let runs = roots.into_iter().map(|root| self.run_from(root)).collect();
        SolveReport { runs }
    }

    fn run_from(&mut self, start: Lit) -> RunReport {
        let codec = self.engine.codec();
        let started = Instant::now();
        let outcome = self.engine.run(start);
        let elapsed = started.elapsed();

        tracing::debug!(
            base = codec.decode(start),
            satisfiable = outcome.satisfiable,
            mdb = outcome.mdb_size,
            work = outcome.stats.work,
            "run finished"
        );

        Self::report(codec.decode(start), outcome, elapsed, codec.num_vars())
    }

    fn report(base: i32, outcome: RunOutcome, elapsed: Duration, num_vars: u32) -> RunReport {
        let order = outcome.stats.order(num_vars);
        RunReport {
            base,
            satisfiable: outcome.satisfiable,
            solution: outcome.assignment.map(Solution::new),
            elapsed,
            mdb_size: outcome.mdb_size,
            order,
            stats: outcome.stats,
        }
    }
}

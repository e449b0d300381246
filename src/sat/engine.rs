#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! One [`Engine::run`] explores the formula from a single starting
//! literal. Each iteration of the main loop appends one candidate to
//! lambda, asks the visited-state table whether the state is new, and
//! saturates the assignment with forced literals. A conflict, a repeat
//! state or a failed full-size certification flips the candidate's
//! polarity; when both polarities have failed the last literal is
//! popped. An emptied lambda restarts from the next unused header, and
//! the run reports UNSAT once all `2n` headers are spent.
//!
//! A finished run is certified against the original clause set before
//! being reported as SAT: size, internal consistency and clause
//! coverage are all re-checked, so an invariant violation inside the
//! search surfaces as UNSAT rather than a bogus model.

use crate::sat::adjacency::Adjacency;
use crate::sat::assignment::Lambda;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Codec, Lit};
use crate::sat::memo::StateMemo;
use crate::sat::propagation::Propagator;
use crate::sat::stats::SearchStats;
use rustc_hash::FxHashSet;

/// The verdict and artifacts of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The starting literal of the run.
    pub base: Lit,
    /// Whether a certified model was found.
    pub satisfiable: bool,
    /// The certified model, decoded to signed literals, when SAT.
    pub assignment: Option<Vec<i32>>,
    /// Distinct states recorded by the memo table.
    pub mdb_size: usize,
    /// The run's work counters and history.
    pub stats: SearchStats,
}

/// The search engine for one formula.
///
/// The clause arrays and adjacency indexes are built once and treated
/// as immutable; lambda, the header vector, the memo table and the
/// stats are reset at the start of every run.
#[derive(Debug, Clone)]
pub struct Engine {
    codec: Codec,
    cnf: Cnf,
    propagator: Propagator,
    lambda: Lambda,
    header: Vec<bool>,
    memo: StateMemo,
    stats: SearchStats,
}

impl Engine {
    /// Builds an engine for a formula.
    #[must_use]
    pub fn new(cnf: Cnf) -> Self {
        let codec = cnf.codec();
        let adjacency = Adjacency::build(&cnf);
        Self {
            codec,
            propagator: Propagator::new(codec, adjacency),
            lambda: Lambda::new(codec),
            header: vec![false; codec.num_lits() as usize + 1],
            memo: StateMemo::new(),
            stats: SearchStats::new(),
            cnf,
        }
    }

    /// The formula under search.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// The formula's literal codec.
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Searches from `start`, running until a certified model is found
    /// or every header is exhausted.
    pub fn run(&mut self, start: Lit) -> RunOutcome {
        self.reset();

        let num_vars = self.codec.num_vars() as usize;
        let mut candidate = start;
        let mut flip = false;

        self.lambda.push_back(start);
        self.header[start.index()] = true;

        while self.lambda.len() < num_vars {
            if self.lambda.is_empty() {
                let Some(root) = self.increment_header() else {
                    break;
                };
                candidate = root;
            }

            while self.lambda.contains(candidate)
                || self.lambda.contains(self.codec.opposite(candidate))
            {
                candidate = self.codec.next_cyclic(candidate);
            }
            self.lambda.push_back(candidate);

            let sat = self.save_state()
                && self
                    .propagator
                    .saturate(&mut self.lambda, &mut self.stats);

            if !sat || (self.lambda.len() == num_vars && !self.certify()) {
                flip = !flip;
                self.lambda.remove(candidate);
                candidate = self.codec.opposite(candidate);
                if !flip {
                    self.lambda.pop_back();
                    if self.lambda.len() == 1 {
                        if let Some(lone) = self.lambda.front() {
                            self.header[lone.index()] = true;
                            self.header[self.codec.opposite(lone).index()] = true;
                        }
                    }
                }
            } else {
                self.save_state();
                flip = false;
            }

            let front = self.lambda.front().unwrap_or(candidate);
            self.stats
                .record_iteration(self.lambda.len(), candidate, front);
        }

        let satisfiable = self.lambda.len() == num_vars && self.certify();
        RunOutcome {
            base: start,
            satisfiable,
            assignment: satisfiable.then(|| self.lambda.decoded(self.codec)),
            mdb_size: self.memo.len(),
            stats: self.stats.clone(),
        }
    }

    /// Validates the finished assignment: full size, no literal
    /// together with its opposite, and every clause covered.
    #[must_use]
    pub fn certify(&self) -> bool {
        if self.lambda.len() != self.codec.num_vars() as usize {
            return false;
        }
        if self
            .lambda
            .iter()
            .any(|lit| self.lambda.contains(self.codec.opposite(lit)))
        {
            return false;
        }
        let model: FxHashSet<i32> = self
            .lambda
            .iter()
            .map(|lit| self.codec.decode(lit))
            .collect();
        self.cnf.iter().all(|clause| clause.satisfied_by(&model))
    }

    /// Records the current lambda in the memo table and charges
    /// `|lambda|` work. `true` means the state is new.
    fn save_state(&mut self) -> bool {
        self.stats.add_work(self.lambda.len());
        self.memo.record(&self.lambda)
    }

    /// Marks the next unused header literal, seeds lambda with it and
    /// returns it. `None` once all `2n` headers have served.
    fn increment_header(&mut self) -> Option<Lit> {
        let root = self.codec.lits().find(|lit| !self.header[lit.index()])?;
        self.header[root.index()] = true;
        self.lambda.push_back(root);
        Some(root)
    }

    fn reset(&mut self) {
        self.lambda.clear();
        self.header.fill(false);
        self.memo.reset();
        self.stats = SearchStats::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::dimacs::parse_dimacs_text;

    fn engine(text: &str) -> Engine {
        Engine::new(parse_dimacs_text(text).unwrap())
    }

    fn assert_certified(outcome: &RunOutcome, cnf: &Cnf) {
        let model: FxHashSet<i32> = outcome
            .assignment
            .as_ref()
            .expect("SAT outcome must carry a model")
            .iter()
            .copied()
            .collect();
        assert_eq!(model.len(), cnf.num_vars as usize);
        assert!(cnf.iter().all(|clause| clause.satisfied_by(&model)));
    }

    #[test]
    fn test_single_variable_single_clause() {
        let mut engine = engine("p cnf 1 1\n1 1 1 0\n");
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.satisfiable);
        assert_eq!(outcome.assignment, Some(vec![1]));
    }

    #[test]
    fn test_tautological_clause_is_sat() {
        let mut engine = engine("p cnf 1 1\n1 -1 1 0\n");
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.satisfiable);
    }

    #[test]
    fn test_contradictory_pair_is_unsat_from_every_root() {
        let mut engine = engine("p cnf 1 2\n1 1 1 0\n-1 -1 -1 0\n");
        for raw in 1..=2 {
            let outcome = engine.run(Lit::from_raw(raw));
            assert!(!outcome.satisfiable, "root {raw} must be UNSAT");
            assert!(outcome.assignment.is_none());
        }
    }

    #[test]
    fn test_two_clause_three_variable_sat() {
        let mut engine = engine("p cnf 3 2\n1 2 3 0\n-1 -2 -3 0\n");
        let cnf = engine.cnf().clone();
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.satisfiable);
        assert_certified(&outcome, &cnf);
    }

    #[test]
    fn test_trivial_sat_forces_shared_literal() {
        let mut engine = engine("p cnf 3 2\n1 2 3 0\n-1 -2 3 0\n");
        let cnf = engine.cnf().clone();
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.satisfiable);
        assert!(outcome.assignment.as_ref().unwrap().contains(&3));
        assert_certified(&outcome, &cnf);
    }

    #[test]
    fn test_forced_chain_assigns_the_forced_literal() {
        let mut engine = engine("p cnf 2 2\n1 2 2\n-1 2 2\n");
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.satisfiable);
        let model = outcome.assignment.unwrap();
        assert!(model.contains(&2), "2 is forced by both clauses");
    }

    #[test]
    fn test_pigeonhole_like_unsat() {
        let text = "p cnf 2 4\n1 1 1\n-1 -1 -1\n2 2 2\n-2 -2 -2\n";
        let mut engine = engine(text);
        for raw in 1..=4 {
            assert!(!engine.run(Lit::from_raw(raw)).satisfiable);
        }
    }

    #[test]
    fn test_polarity_flip_recovery_from_negative_root() {
        // A run rooted at the falsifying polarity of 3 must still
        // reach a certified model.
        let mut engine = engine("p cnf 3 3\n1 2 3\n-1 2 3\n1 -2 3\n");
        let cnf = engine.cnf().clone();
        let negative_three = cnf.codec().encode(-3);
        let outcome = engine.run(negative_three);
        assert!(outcome.satisfiable);
        assert_certified(&outcome, &cnf);
    }

    #[test]
    fn test_repeat_states_are_pruned() {
        let mut engine = engine("p cnf 3 2\n1 2 3 0\n-1 -2 3 0\n");
        let outcome = engine.run(Lit::from_raw(1));
        // Every distinct state is recorded at most once, so the memo
        // size never exceeds the save count yet stays positive.
        assert!(outcome.mdb_size >= 1);
        assert!(outcome.satisfiable);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let text = "p cnf 3 3\n1 2 3\n-1 2 3\n1 -2 3\n";
        let mut engine = engine(text);
        let first = engine.run(Lit::from_raw(2));
        let second = engine.run(Lit::from_raw(2));
        assert_eq!(first.satisfiable, second.satisfiable);
        assert_eq!(first.assignment, second.assignment);
        assert!((first.stats.work - second.stats.work).abs() < f64::EPSILON);
        assert_eq!(first.mdb_size, second.mdb_size);
    }

    #[test]
    fn test_certify_rejects_inconsistent_lambda() {
        let mut engine = engine("p cnf 2 1\n1 2 2 0\n");
        engine.lambda.push_back(Lit::from_raw(1));
        engine.lambda.push_back(Lit::from_raw(3));
        assert!(!engine.certify(), "1 together with -1 must not certify");
    }

    #[test]
    fn test_certify_rejects_uncovered_clause() {
        let mut engine = engine("p cnf 2 2\n1 2 2 0\n-1 -2 -2 0\n");
        engine.lambda.push_back(Lit::from_raw(1));
        engine.lambda.push_back(Lit::from_raw(2));
        assert!(!engine.certify(), "clause (-1 -2 -2) is uncovered");
    }

    #[test]
    fn test_work_counter_is_positive_after_a_run() {
        let mut engine = engine("p cnf 3 2\n1 2 3 0\n-1 -2 3 0\n");
        let outcome = engine.run(Lit::from_raw(1));
        assert!(outcome.stats.work > 0.0);
        assert!(outcome.stats.order(3) >= 0.0);
    }
}

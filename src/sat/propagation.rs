#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit derivation and propagation over the opposite-adjacency index.
//!
//! Every pair `(x, y)` in `adj_opp[l]` encodes a clause whose third
//! literal is the opposite of `l`. Under a partial assignment that
//! falsifies one of `x`, `y`, the other becomes forced; a pair with
//! both sides falsified is a conflict.
//!
//! Three primitives build on this reading:
//! - [`Propagator::find_units`] collects forced literals for one anchor
//!   without touching lambda;
//! - [`Propagator::unit_propagate`] drives a FIFO frontier of forced
//!   literals to a local fixpoint, rolling lambda back on conflict;
//! - [`Propagator::opposite_propagate`] checks every pair of an anchor
//!   for coverage, recursing into unit propagation for uncovered pairs.
//!
//! [`Propagator::saturate`] iterates the first two over a snapshot of
//! lambda, then the third over a second snapshot, restoring the entry
//! state on any failure. Conflicts are ordinary `bool` returns: they
//! are the backtrack signal of the search, never errors.

use crate::sat::adjacency::Adjacency;
use crate::sat::assignment::Lambda;
use crate::sat::literal::{Codec, Lit};
use crate::sat::stats::SearchStats;
use std::collections::VecDeque;

/// The propagation engine: the immutable indexes plus the codec.
#[derive(Debug, Clone)]
pub struct Propagator {
    codec: Codec,
    adjacency: Adjacency,
}

impl Propagator {
    /// Creates a propagator over prebuilt indexes.
    #[must_use]
    pub const fn new(codec: Codec, adjacency: Adjacency) -> Self {
        Self { codec, adjacency }
    }

    /// The adjacency indexes.
    #[must_use]
    pub const fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Collects literals forced by `anchor` into `units`.
    ///
    /// For each pair `(x, y)` of `adj_opp[anchor]`: a falsified `x`
    /// forces `y`, a falsified `y` forces `x`. Literals already in
    /// lambda or already queued are skipped. Lambda is not mutated.
    pub fn find_units(
        &self,
        anchor: Lit,
        lambda: &Lambda,
        units: &mut VecDeque<Lit>,
        stats: &mut SearchStats,
    ) {
        stats.find_units_calls += 1;
        stats.add_work(self.adjacency.opposite_companions(anchor).len());

        for (x, y) in self.adjacency.opposite_pairs(anchor) {
            if lambda.contains(self.codec.opposite(x)) && !lambda.contains(y) && !units.contains(&y)
            {
                units.push_back(y);
            }
            if lambda.contains(self.codec.opposite(y)) && !lambda.contains(x) && !units.contains(&x)
            {
                units.push_back(x);
            }
        }
    }

    /// Propagates the units reachable from `anchor` to a local
    /// fixpoint. Returns `false` on conflict, with lambda restored to
    /// its entry value; on success the forced literals sit at the front
    /// of lambda.
    ///
    /// Only active when more than one literal is assigned; with a bare
    /// root there is nothing to falsify pairs against.
    pub fn unit_propagate(
        &self,
        anchor: Lit,
        lambda: &mut Lambda,
        stats: &mut SearchStats,
    ) -> bool {
        stats.get_units_calls += 1;
        if lambda.len() <= 1 {
            return true;
        }

        let snapshot = lambda.clone();
        let mut units = VecDeque::new();
        self.find_units(anchor, lambda, &mut units, stats);

        let mut conflicted = false;
        while let Some(unit) = units.pop_front() {
            let opposite = self.codec.opposite(unit);
            if lambda.contains(opposite) || units.contains(&opposite) {
                conflicted = true;
                break;
            }
            lambda.push_front(unit);
            self.find_units(unit, lambda, &mut units, stats);
        }

        if conflicted {
            *lambda = snapshot;
            return false;
        }
        true
    }

    /// Checks every pair of `adj_opp[anchor]` for coverage.
    ///
    /// A pair with both sides falsified is a conflict. A pair is
    /// covered when either side is assigned, or when unit propagation
    /// from either side succeeds. Returns `false` on the first failing
    /// pair; lambda is left as-is on failure (callers hold the
    /// snapshot).
    pub fn opposite_propagate(
        &self,
        anchor: Lit,
        lambda: &mut Lambda,
        stats: &mut SearchStats,
    ) -> bool {
        stats.get_opp_units_calls += 1;
        stats.add_work(self.adjacency.opposite_companions(anchor).len());

        for (x, y) in self.adjacency.opposite_pairs(anchor) {
            if lambda.contains(self.codec.opposite(x)) && lambda.contains(self.codec.opposite(y)) {
                return false;
            }
            let covered = lambda.contains(x)
                || lambda.contains(y)
                || self.unit_propagate(x, lambda, stats)
                || self.unit_propagate(y, lambda, stats);
            if !covered {
                return false;
            }
        }
        true
    }

    /// Saturates lambda with every currently derivable unit.
    ///
    /// Phase one runs unit propagation from each literal of a snapshot
    /// of lambda; phase two re-snapshots and runs the opposite-driven
    /// check from each literal. Any failure restores the entry snapshot
    /// and returns `false`. On success no clause is violated and every
    /// currently propagable literal is assigned.
    pub fn saturate(&self, lambda: &mut Lambda, stats: &mut SearchStats) -> bool {
        let entry = lambda.clone();

        let conflicted = entry
            .iter()
            .any(|anchor| !self.unit_propagate(anchor, lambda, stats));
        if conflicted {
            *lambda = entry;
            return false;
        }

        let saturated = lambda.clone();
        let conflicted = saturated
            .iter()
            .any(|anchor| !self.opposite_propagate(anchor, lambda, stats));
        if conflicted {
            *lambda = entry;
            return false;
        }
        true
    }
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-literal companion indexes over the clause list.
//!
//! For every encoded literal `l`, `adj[l]` is a flat sequence of
//! companion pairs: each occurrence of `l` in a clause contributes the
//! other two literals of that clause, in clause order. The list length
//! is therefore always even, and entries `2i`, `2i + 1` belong to one
//! occurrence.
//!
//! `adj_opp[l]` mirrors the adjacency of `l`'s opposite. Within each of
//! its pairs, a literal whose opposite also occurs in the list is moved
//! to the second slot, so propagation scans the more constrained side
//! last. Both indexes are built once per formula and never mutated.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Codec, Lit};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Flat companion-pair storage for one literal.
pub type PairList = SmallVec<[Lit; 8]>;

/// The two companion indexes of a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    /// `adj[l]`: companions of each occurrence of `l`. Slot 0 unused.
    adj: Vec<PairList>,
    /// `adj_opp[l]`: companions of each occurrence of `Opposite(l)`,
    /// pair-normalised. Slot 0 unused.
    adj_opp: Vec<PairList>,
}

impl Adjacency {
    /// Builds both indexes from a formula.
    #[must_use]
    pub fn build(cnf: &Cnf) -> Self {
        let codec = cnf.codec();
        let size = codec.num_lits() as usize + 1;

        let mut adj: Vec<PairList> = vec![PairList::new(); size];
        for clause in cnf.iter() {
            let [a, b, c] = clause.literals();
            adj[codec.encode(a).index()].extend([codec.encode(b), codec.encode(c)]);
            adj[codec.encode(b).index()].extend([codec.encode(a), codec.encode(c)]);
            adj[codec.encode(c).index()].extend([codec.encode(a), codec.encode(b)]);
        }

        let mut adj_opp: Vec<PairList> = vec![PairList::new(); size];
        for lit in codec.lits() {
            adj_opp[lit.index()] = adj[codec.opposite(lit).index()].clone();
        }
        for list in &mut adj_opp {
            normalise_pairs(codec, list);
        }

        Self { adj, adj_opp }
    }

    /// The flat companion list of `lit`. Even length.
    #[must_use]
    pub fn companions(&self, lit: Lit) -> &[Lit] {
        &self.adj[lit.index()]
    }

    /// The flat, pair-normalised companion list of `Opposite(lit)`.
    #[must_use]
    pub fn opposite_companions(&self, lit: Lit) -> &[Lit] {
        &self.adj_opp[lit.index()]
    }

    /// Iterates `adj_opp[lit]` as `(x, y)` pairs.
    pub fn opposite_pairs(&self, lit: Lit) -> impl Iterator<Item = (Lit, Lit)> + '_ {
        self.adj_opp[lit.index()]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }
}

/// Moves the more constrained side of each pair into the second slot: a
/// pair is swapped when the opposite of its first element occurs in the
/// first column, then swapped again when the opposite of its (possibly
/// new) second element occurs in the second column. Column sets are
/// snapshotted before any swap.
fn normalise_pairs(codec: Codec, list: &mut PairList) {
    let left: FxHashSet<Lit> = list.iter().step_by(2).copied().collect();
    let right: FxHashSet<Lit> = list.iter().skip(1).step_by(2).copied().collect();

    for pair in list.chunks_exact_mut(2) {
        if left.contains(&codec.opposite(pair[0])) {
            pair.swap(0, 1);
        }
        if right.contains(&codec.opposite(pair[1])) {
            pair.swap(0, 1);
        }
    }
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The partial assignment, called lambda throughout the solver.
//!
//! Lambda is an ordered sequence of encoded literals paired with a
//! bit-mask over the `1..=2n` space for constant-time membership. The
//! search driver appends candidates at the back; unit propagation
//! prepends forced literals at the front. Both insertion paths keep the
//! mask in step with the sequence.
//!
//! Conflict rollback is by value: callers `clone()` on entry and assign
//! the snapshot back on failure.

use crate::sat::literal::{Codec, Lit};
use bit_vec::BitVec;

/// The solver's partial assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    order: Vec<Lit>,
    member: BitVec,
}

impl Lambda {
    /// Creates an empty lambda for a formula with the given codec.
    #[must_use]
    pub fn new(codec: Codec) -> Self {
        Self {
            order: Vec::with_capacity(codec.num_vars() as usize),
            member: BitVec::from_elem(codec.num_lits() as usize + 1, false),
        }
    }

    /// The number of assigned literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, lit: Lit) -> bool {
        self.member.get(lit.index()).unwrap_or(false)
    }

    /// Appends a literal at the back (the driver's insertion path).
    pub fn push_back(&mut self, lit: Lit) {
        self.order.push(lit);
        self.member.set(lit.index(), true);
    }

    /// Prepends a literal at the front (the propagation insertion path).
    pub fn push_front(&mut self, lit: Lit) {
        self.order.insert(0, lit);
        self.member.set(lit.index(), true);
    }

    /// Removes the last literal and returns it.
    pub fn pop_back(&mut self) -> Option<Lit> {
        let lit = self.order.pop()?;
        self.member.set(lit.index(), false);
        Some(lit)
    }

    /// Removes a specific literal wherever it sits in the sequence.
    /// Returns `true` when it was present.
    pub fn remove(&mut self, lit: Lit) -> bool {
        let Some(pos) = self.order.iter().position(|&l| l == lit) else {
            return false;
        };
        self.order.remove(pos);
        self.member.set(lit.index(), false);
        true
    }

    /// The front literal, if any.
    #[must_use]
    pub fn front(&self) -> Option<Lit> {
        self.order.first().copied()
    }

    /// Clears the assignment.
    pub fn clear(&mut self) {
        self.order.clear();
        self.member.clear();
    }

    /// Iterates the assigned literals in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.order.iter().copied()
    }

    /// Decodes the assignment to signed literals, sorted by variable.
    #[must_use]
    pub fn decoded(&self, codec: Codec) -> Vec<i32> {
        let mut signed: Vec<i32> = self.order.iter().map(|&l| codec.decode(l)).collect();
        signed.sort_unstable_by_key(|lit| lit.unsigned_abs());
        signed
    }
}

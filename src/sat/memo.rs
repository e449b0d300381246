#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Memoization of visited lambda states.
//!
//! A state is identified by the *set* of currently assigned literals:
//! the key is the sorted raw literal sequence, so any two insertion
//! orders of the same literals collapse onto one entry. The stored
//! value is the lambda size at first insertion.
//!
//! The table answers one question for the search driver: has this
//! partial assignment been reached before? A repeat is treated as a
//! conflict for progress purposes, pruning paths that converge on an
//! already explored state.

use crate::sat::assignment::Lambda;
use crate::sat::literal::Lit;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// The visited-state table.
#[derive(Debug, Clone, Default)]
pub struct StateMemo {
    seen: FxHashMap<Box<[u32]>, usize>,
}

impl StateMemo {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current lambda state. Returns `true` on first
    /// insertion, `false` when the same literal set was seen before.
    pub fn record(&mut self, lambda: &Lambda) -> bool {
        let key: Box<[u32]> = lambda.iter().map(Lit::get).sorted_unstable().collect();
        match self.seen.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(lambda.len());
                true
            }
        }
    }

    /// The number of distinct states recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// `true` when no state has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forgets every recorded state.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::{Codec, Lit};

    #[test]
    fn test_first_insertion_is_fresh() {
        let mut memo = StateMemo::new();
        let mut lambda = Lambda::new(Codec::new(3));
        lambda.push_back(Lit::from_raw(1));
        assert!(memo.record(&lambda));
        assert!(!memo.record(&lambda));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_key_ignores_insertion_order() {
        let codec = Codec::new(3);
        let mut memo = StateMemo::new();

        let mut first = Lambda::new(codec);
        first.push_back(Lit::from_raw(1));
        first.push_back(Lit::from_raw(5));

        let mut second = Lambda::new(codec);
        second.push_back(Lit::from_raw(5));
        second.push_front(Lit::from_raw(1));

        assert!(memo.record(&first));
        assert!(!memo.record(&second));
    }

    #[test]
    fn test_distinct_sets_are_distinct_states() {
        let mut memo = StateMemo::new();
        let mut lambda = Lambda::new(Codec::new(3));
        lambda.push_back(Lit::from_raw(1));
        assert!(memo.record(&lambda));
        lambda.push_back(Lit::from_raw(2));
        assert!(memo.record(&lambda));
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_reset_forgets() {
        let mut memo = StateMemo::new();
        let mut lambda = Lambda::new(Codec::new(2));
        lambda.push_back(Lit::from_raw(2));
        memo.record(&lambda);
        memo.reset();
        assert!(memo.is_empty());
        assert!(memo.record(&lambda));
    }
}

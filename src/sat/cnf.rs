#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 3-CNF formula store.
//!
//! A formula is a conjunction of clauses, each a disjunction of exactly
//! three signed literals. Degenerate 1- and 2-literal clauses are
//! represented as triples with the missing slots filled by duplicating
//! the preceding literal, so every clause iterates as a 3-tuple while
//! staying semantically 1- or 2-ary.
//!
//! The store is built once per formula and treated as immutable during
//! search; only the adjacency indexes derived from it are consulted on
//! the hot path.

use crate::sat::literal::Codec;
use crate::sat::solver::Solution;
use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::Index;

/// One ternary clause, stored as its three signed literals in input
/// order. Column `a` is the slot the solution reporter rotates the
/// satisfying literal into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clause {
    /// First literal.
    pub a: i32,
    /// Second literal.
    pub b: i32,
    /// Third literal.
    pub c: i32,
}

impl Clause {
    /// Creates a clause from its three signed literals.
    #[must_use]
    pub const fn new(a: i32, b: i32, c: i32) -> Self {
        Self { a, b, c }
    }

    /// The literals in column order.
    #[must_use]
    pub const fn literals(self) -> [i32; 3] {
        [self.a, self.b, self.c]
    }

    /// Iterates the literals in column order.
    pub fn iter(self) -> impl Iterator<Item = i32> {
        self.literals().into_iter()
    }

    /// `true` when at least one literal of the clause is in `model`.
    #[must_use]
    pub fn satisfied_by(self, model: &FxHashSet<i32>) -> bool {
        self.iter().any(|lit| model.contains(&lit))
    }

    /// Rotates `lit` into column `a`, preserving the cyclic order of
    /// the remaining two. Returns the clause unchanged when `lit` does
    /// not occur in it.
    #[must_use]
    pub const fn rotated_to_front(self, lit: i32) -> Self {
        if self.a == lit {
            self
        } else if self.b == lit {
            Self::new(self.b, self.c, self.a)
        } else if self.c == lit {
            Self::new(self.c, self.a, self.b)
        } else {
            self
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.b, self.c)
    }
}

impl From<[i32; 3]> for Clause {
    fn from(lits: [i32; 3]) -> Self {
        Self::new(lits[0], lits[1], lits[2])
    }
}

/// A 3-CNF formula: the clause list plus the declared variable count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The clauses, in input order.
    pub clauses: Vec<Clause>,
    /// The declared variable count `n`; variables are `1..=n`.
    pub num_vars: u32,
}

impl Cnf {
    /// Creates a formula over `num_vars` variables from a clause list.
    #[must_use]
    pub fn new(num_vars: u32, clauses: Vec<Clause>) -> Self {
        Self { clauses, num_vars }
    }

    /// The number of clauses `m`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when the formula has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates the clauses in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// The literal codec for this formula's variable count.
    #[must_use]
    pub const fn codec(&self) -> Codec {
        Codec::new(self.num_vars)
    }

    /// Verifies a model against the formula: every clause must contain
    /// at least one literal of the model.
    #[must_use]
    pub fn verify(&self, solution: &Solution) -> bool {
        let model: FxHashSet<i32> = solution.iter().collect();
        self.iter().all(|clause| clause.satisfied_by(&model))
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl From<Vec<[i32; 3]>> for Cnf {
    /// Builds a formula from raw triples, deriving `num_vars` from the
    /// largest variable mentioned.
    fn from(triples: Vec<[i32; 3]>) -> Self {
        let num_vars = triples
            .iter()
            .flat_map(|t| t.iter())
            .map(|lit| lit.unsigned_abs())
            .max()
            .unwrap_or(0);
        let clauses = triples.into_iter().map(Clause::from).collect();
        Self::new(num_vars, clauses)
    }
}

impl fmt::Display for Cnf {
    /// Formats the formula in DIMACS CNF.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.len())?;
        for clause in self.iter() {
            writeln!(f, "{clause} 0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triples_derives_num_vars() {
        let cnf = Cnf::from(vec![[1, -2, 3], [-1, 2, 4]]);
        assert_eq!(cnf.num_vars, 4);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[0], Clause::new(1, -2, 3));
    }

    #[test]
    fn test_clause_satisfied_by() {
        let clause = Clause::new(1, -2, 3);
        let model: FxHashSet<i32> = [-1, -2, -3].into_iter().collect();
        assert!(clause.satisfied_by(&model));

        let model: FxHashSet<i32> = [-1, 2, -3].into_iter().collect();
        assert!(!clause.satisfied_by(&model));
    }

    #[test]
    fn test_rotated_to_front() {
        let clause = Clause::new(1, -2, 3);
        assert_eq!(clause.rotated_to_front(1), Clause::new(1, -2, 3));
        assert_eq!(clause.rotated_to_front(-2), Clause::new(-2, 3, 1));
        assert_eq!(clause.rotated_to_front(3), Clause::new(3, 1, -2));
        assert_eq!(clause.rotated_to_front(7), clause);
    }

    #[test]
    fn test_verify_model() {
        let cnf = Cnf::from(vec![[1, 2, 3], [-1, -2, 3]]);
        assert!(cnf.verify(&Solution::new(vec![1, -2, 3])));
        assert!(cnf.verify(&Solution::new(vec![-1, 2, 3])));
        assert!(!cnf.verify(&Solution::new(vec![-1, -2, -3])));
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = Cnf::from(vec![[1, -2, 3]]);
        let text = cnf.to_string();
        assert!(text.contains("p cnf 3 1"));
        assert!(text.contains("1 -2 3 0"));
    }
}

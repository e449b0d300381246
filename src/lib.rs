#![deny(missing_docs)]
//! NanoSat: an experimental 3-SAT solver.
//!
//! The solver decides satisfiability of formulas in 3-CNF by growing a
//! partial assignment (lambda) one literal at a time, saturating it with
//! forced literals derived from an opposite-adjacency index, and pruning
//! repeated search states through a memoized visited-state table.

/// The `sat` module implements the solver core: literal encoding, the
/// clause store, adjacency indexes, propagation, the search engine and
/// the multi-root driver.
pub mod sat;

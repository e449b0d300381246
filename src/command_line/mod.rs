//! The command-line surface: argument parsing, single-file and batch
//! drivers, and the console/CSV/solution-file reporters.

pub(crate) mod cli;
pub(crate) mod report;

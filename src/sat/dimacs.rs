#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF format, restricted to 3-CNF.
//!
//! The accepted subset is whitespace-tolerant:
//! - comment lines start with `c`, a `%` line ends the data;
//! - a `p cnf <n> <m>` problem line is required before any clause;
//! - each subsequent non-empty line holds one clause as space-separated
//!   signed integers, with an optional trailing `0` terminator.
//!
//! Clauses with fewer than three non-zero literals are padded by
//! duplicating the preceding literal, so 1- and 2-literal clauses become
//! degenerate triples. Clauses with more than three literals are
//! rejected: the solver core only understands ternary clauses.

use crate::sat::cnf::{Clause, Cnf};
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Everything that can go wrong while reading a formula file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A clause line appeared before the `p cnf` problem line, or the
    /// input ended without one.
    #[error("missing 'p cnf <vars> <clauses>' problem line")]
    MissingHeader,

    /// The problem line did not carry two integer fields.
    #[error("malformed problem line: {0:?}")]
    BadHeader(String),

    /// A clause token was not a signed integer.
    #[error("line {line}: cannot parse literal {token:?}")]
    BadLiteral {
        /// 1-based input line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A literal mentioned a variable outside `1..=n`.
    #[error("line {line}: literal {literal} outside declared range 1..={num_vars}")]
    LiteralOutOfRange {
        /// 1-based input line number.
        line: usize,
        /// The offending literal.
        literal: i32,
        /// The declared variable count.
        num_vars: u32,
    },

    /// A clause carried more than three non-zero literals.
    #[error("line {line}: clause has {count} literals, expected at most 3")]
    NotTernary {
        /// 1-based input line number.
        line: usize,
        /// Number of non-zero literals found.
        count: usize,
    },

    /// No clauses were found after the problem line.
    #[error("no clauses found")]
    EmptyFormula,
}

/// Parses DIMACS data from any buffered reader.
///
/// # Errors
///
/// Returns a [`ParseError`] on i/o failure, a missing or malformed
/// problem line, non-integer literal tokens, out-of-range literals, or
/// clauses wider than three literals.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut num_vars: Option<u32> = None;
    let mut clauses: Vec<Clause> = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_no = idx + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => {
                num_vars = Some(parse_header(&line)?);
            }
            Some(_) => {
                let n = num_vars.ok_or(ParseError::MissingHeader)?;
                clauses.push(parse_clause(parts, line_no, n)?);
            }
        }
    }

    let num_vars = num_vars.ok_or(ParseError::MissingHeader)?;
    if clauses.is_empty() {
        return Err(ParseError::EmptyFormula);
    }
    Ok(Cnf::new(num_vars, clauses))
}

/// Parses DIMACS data from an in-memory string; the test seam.
///
/// # Errors
///
/// Same as [`parse_dimacs`].
pub fn parse_dimacs_text(text: &str) -> Result<Cnf, ParseError> {
    parse_dimacs(io::Cursor::new(text))
}

/// Opens and parses a formula file.
///
/// # Errors
///
/// Same as [`parse_dimacs`], plus the open itself.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

fn parse_header(line: &str) -> Result<u32, ParseError> {
    let mut fields = line.split_whitespace();
    let bad = || ParseError::BadHeader(line.to_string());

    if fields.next() != Some("p") || fields.next() != Some("cnf") {
        return Err(bad());
    }
    let num_vars = fields.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    // Clause count field is required but not enforced against the body.
    let _num_clauses: u32 = fields.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    Ok(num_vars)
}

fn parse_clause<'a, I>(tokens: I, line: usize, num_vars: u32) -> Result<Clause, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut literals: Vec<i32> = Vec::with_capacity(3);
    for token in tokens {
        let literal: i32 = token.parse().map_err(|_| ParseError::BadLiteral {
            line,
            token: token.to_string(),
        })?;
        if literal == 0 {
            continue;
        }
        if literal.unsigned_abs() > num_vars {
            return Err(ParseError::LiteralOutOfRange {
                line,
                literal,
                num_vars,
            });
        }
        literals.push(literal);
    }

    match literals.as_slice() {
        [a] => Ok(Clause::new(*a, *a, *a)),
        [a, b] => Ok(Clause::new(*a, *b, *b)),
        [a, b, c] => Ok(Clause::new(*a, *b, *c)),
        [] => Err(ParseError::NotTernary { line, count: 0 }),
        wide => Err(ParseError::NotTernary {
            line,
            count: wide.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let cnf = parse_dimacs_text(
            "c a comment\n\
             p cnf 3 2\n\
             1 2 3 0\n\
             -1 -2 3 0\n",
        )
        .unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[1], Clause::new(-1, -2, 3));
    }

    #[test]
    fn test_trailing_zero_optional() {
        let cnf = parse_dimacs_text("p cnf 2 2\n1 2 2\n-1 2 2\n").unwrap();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[0], Clause::new(1, 2, 2));
    }

    #[test]
    fn test_short_clauses_are_padded() {
        let cnf = parse_dimacs_text("p cnf 2 2\n1 0\n-1 2 0\n").unwrap();
        assert_eq!(cnf[0], Clause::new(1, 1, 1));
        assert_eq!(cnf[1], Clause::new(-1, 2, 2));
    }

    #[test]
    fn test_end_marker_and_blank_lines() {
        let cnf = parse_dimacs_text("p cnf 1 1\n\n1 0\n%\nignored garbage\n").unwrap();
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(matches!(
            parse_dimacs_text("1 2 3 0\n"),
            Err(ParseError::MissingHeader)
        ));
        assert!(matches!(
            parse_dimacs_text("c nothing here\n"),
            Err(ParseError::MissingHeader)
        ));
    }

    #[test]
    fn test_bad_literal_is_rejected() {
        assert!(matches!(
            parse_dimacs_text("p cnf 3 1\n1 abc 3 0\n"),
            Err(ParseError::BadLiteral { line: 2, .. })
        ));
    }

    #[test]
    fn test_wide_clause_is_rejected() {
        assert!(matches!(
            parse_dimacs_text("p cnf 4 1\n1 2 3 4 0\n"),
            Err(ParseError::NotTernary { count: 4, .. })
        ));
    }

    #[test]
    fn test_out_of_range_literal_is_rejected() {
        assert!(matches!(
            parse_dimacs_text("p cnf 2 1\n1 2 3 0\n"),
            Err(ParseError::LiteralOutOfRange { literal: 3, .. })
        ));
    }

    #[test]
    fn test_empty_formula_is_rejected() {
        assert!(matches!(
            parse_dimacs_text("p cnf 3 0\n"),
            Err(ParseError::EmptyFormula)
        ));
    }
}

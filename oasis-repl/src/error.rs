use oasis_parser::parser::{ast::Expr, Parser};
use rustyline::error::ReadlineError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that stop the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("could not read `{}`: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Standard input could not be read.
    #[error("could not read standard input: {0}")]
    ReadStdin(#[source] io::Error),

    /// Output could not be written.
    #[error("could not write output: {0}")]
    Output(#[source] io::Error),

    /// The line editor failed.
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Returns the error that made the normalized input fail to parse, if it did.
pub fn parse_error(normalized: &str) -> Option<oasis_error::Error> {
    Parser::new(normalized).try_parse_full::<Expr>().err()
}

/// Writes the report of why the normalized input failed to parse to the given writer.
///
/// Nothing is written if the input parses.
pub fn write_parse_report<W: io::Write>(normalized: &str, w: W) -> io::Result<()> {
    match parse_error(normalized) {
        Some(err) => err.write_report("input", normalized, w),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(normalized: &str) -> String {
        let mut out = Vec::new();
        write_parse_report(normalized, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn incomplete_input() {
        let report = report("2*x+");
        assert!(report.contains("unexpected end of input"), "{report}");
    }

    #[test]
    fn unclosed_parenthesis() {
        let report = report("2*(x+1");
        assert!(report.contains("unclosed parenthesis"), "{report}");
    }

    #[test]
    fn valid_input_has_no_report() {
        assert!(parse_error("dd(x^2,x)").is_none());
        assert_eq!(report("x+1"), "");
    }
}

//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the spanned [`Error`] type that carries one.

// lets `#[derive(ErrorKind)]` refer to this crate by name from its own tests
extern crate self as oasis_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `oasis_attrs::ErrorKind`.
pub trait ErrorKind: Debug {
    /// The one-line message of this error, without any source context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal. A fatal error stops speculative parsing from trying any other
    /// alternative.
    pub fatal: bool,
}

impl Error {
    /// Creates a new non-fatal error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// The one-line message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error, with the given source code, to the given writer.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, w: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only print it to a writer.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne::Fmt;
    use oasis_attrs::ErrorKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = "unclosed parenthesis",
        labels = ["this parenthesis is not closed"],
        help = "add a closing parenthesis `)` somewhere after this",
    )]
    struct Unclosed;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unexpected `{}`", self.found),
        labels = [format!("expected {}", "an expression".fg(EXPR)), String::new()],
    )]
    struct Unexpected {
        found: char,
    }

    fn render(err: &Error, input: &str) -> String {
        let mut out = Vec::new();
        err.write_report("input", input, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![2..3], Unexpected { found: '$' });
        assert_eq!(err.message(), "unexpected `$`");
        assert_eq!(err.to_string(), "unexpected `$`");
        assert!(!err.fatal);
    }

    #[test]
    fn report_contains_labels_and_help() {
        let err = Error::new_fatal(vec![3..4], Unclosed);
        let report = render(&err, "2*(x+1");

        assert!(err.fatal);
        assert!(report.contains("unclosed parenthesis"));
        assert!(report.contains("this parenthesis is not closed"));
        assert!(report.contains("add a closing parenthesis"));
    }

    #[test]
    fn empty_labels_are_left_out() {
        let err = Error::new(vec![0..1, 2..3], Unexpected { found: '$' });
        let report = render(&err, "$ $");

        assert_eq!(report.matches("expected an expression").count(), 1);
    }
}

//! The kinds of errors the parser reports. Each one becomes an `ariadne` report through the
//! derived [`ErrorKind`](oasis_error::ErrorKind) implementation.

use ariadne::Fmt;
use oasis_attrs::ErrorKind;
use oasis_error::EXPR;
use crate::tokenizer::TokenKind;

/// Lists token kinds for a label, such as `Add, Sub`.
fn list(kinds: &[TokenKind]) -> String {
    kinds.iter().map(|kind| format!("{:?}", kind)).collect::<Vec<_>>().join(", ")
}

/// The input ended where an operand was required, as in `2x+`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("an {} should follow", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was followed by more input, as in `x+1)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = ["nothing can follow the expression here"],
)]
pub struct ExpectedEof;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected {}", list(self.expected))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],
    pub found: TokenKind,
}

/// A parenthesis has no partner. The span points at the lone parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["no matching parenthesis"],
    help = if self.opening {
        "insert `)` to close this group"
    } else {
        "insert `(` to open this group"
    },
)]
pub struct UnclosedParenthesis {
    /// True for a lone `(`, false for a lone `)`.
    pub opening: bool,
}

/// `()` with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = [format!("write an {} between these", "expression".fg(EXPR))],
)]
pub struct EmptyParenthesis;

/// A function was called with an empty argument, such as `dd(,x)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument in call to `{}`", self.name),
    labels = ["this argument is empty"],
)]
pub struct EmptyArgument {
    pub name: String,
}

/// A numeric literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.lexeme),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The raw text of the literal.
    pub lexeme: String,
}

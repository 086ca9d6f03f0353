use logos::Logos;
use std::ops::Range;

/// Every lexeme the tokenizer recognizes. Anything else becomes a one-character [`Symbol`].
///
/// [`Symbol`]: TokenKind::Symbol
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    /// The Unicode minus sign `−`.
    #[token("−")]
    Minus,

    #[token("*")]
    Mul,

    /// The Unicode multiplication signs `×` and `·`.
    #[token("×")]
    #[token("·")]
    Times,

    #[token("/")]
    Div,

    /// The Unicode division sign `÷`.
    #[token("÷")]
    Divide,

    #[token("^")]
    Exp,

    /// `**`, an alternate spelling of `^`.
    #[token("**")]
    DoubleStar,

    #[regex(r"[a-zA-Z_]+")]
    Name,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*")]
    #[regex(r"\.[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Whitespace
    }
}

/// One lexeme of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// Byte offsets into the input.
    pub span: Range<usize>,
    pub kind: TokenKind,
    pub lexeme: &'source str,
}

impl Token<'_> {
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

//! Operators and the tokens that spell them.
//!
//! Several tokens can spell the same operator: `^` and `**` both raise to a power, and the
//! Unicode signs `×`, `·`, `÷` and `−` stand for their ASCII counterparts.

use crate::{
    parser::{
        error::{kind, Error},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// The kind of an operator, either [`UnaryOpKind`] or [`BinOpKind`].
pub trait OpKind: Copy {
    /// The tokens reported as expected when something else is found.
    const EXPECTED: &'static [TokenKind];

    /// Returns the operator spelled by the given token kind, if any.
    fn from_token(kind: TokenKind) -> Option<Self>;

    /// The canonical ASCII spelling of the operator.
    fn symbol(self) -> &'static str;

    fn precedence(self) -> Precedence;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
}

impl OpKind for UnaryOpKind {
    const EXPECTED: &'static [TokenKind] = &[TokenKind::Sub];

    fn from_token(kind: TokenKind) -> Option<Self> {
        matches!(kind, TokenKind::Sub | TokenKind::Minus).then_some(Self::Neg)
    }

    fn symbol(self) -> &'static str {
        "-"
    }

    fn precedence(self) -> Precedence {
        Precedence::Neg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Only `^` groups to the right, so `2^3^2` is `2^(3^2)`.
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl OpKind for BinOpKind {
    const EXPECTED: &'static [TokenKind] = &[
        TokenKind::Exp,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Add,
        TokenKind::Sub,
    ];

    fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp | TokenKind::DoubleStar => Self::Exp,
            TokenKind::Mul | TokenKind::Times => Self::Mul,
            TokenKind::Div | TokenKind::Divide => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub | TokenKind::Minus => Self::Sub,
            _ => return None,
        })
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }
}

/// An operator token, along with where it appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Op<K> {
    pub kind: K,
    pub span: Range<usize>,
}

pub type UnaryOp = Op<UnaryOpKind>;
pub type BinOp = Op<BinOpKind>;

impl<K: OpKind> Op<K> {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl BinOp {
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl<K: OpKind> Parse for Op<K> {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match K::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: K::EXPECTED,
                found: token.kind,
            })),
        }
    }
}

impl<K: OpKind> fmt::Display for Op<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.kind.symbol())
    }
}

use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

/// Represents any kind of expression in an Oasis input.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses a primary expression: a function call, a parenthesized expression, or a literal.
    pub fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        let last = try_parse_catch_fatal!(
            input.try_parse::<Call>().map(Expr::Call),
            input.try_parse::<Paren>().map(Expr::Paren),
            input.try_parse::<Literal>().map(Expr::Literal),
        );
        Err(last.unwrap_or_else(|| input.error(kind::UnexpectedEof)))
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_primary(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::{BinOp, BinOpKind, OpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

/// A binary expression, such as `1+2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the kind of the next operator in the stream, without consuming it.
    fn peek_op(input: &Parser) -> Option<BinOpKind> {
        input.peek_token().and_then(|token| BinOpKind::from_token(token.kind))
    }

    /// After parsing the operator and the right-hand-side of a potential binary expression, parse
    /// ahead to see if the right-hand-side is incomplete.
    ///
    /// In `1+2*3`, the right-hand-side of `+` is first read as `2`. The following operator `*`
    /// binds tighter than `+`, so the expression starting at `2` is parsed first, giving `2*3` as
    /// the right-hand-side. The same happens for an operator of equal precedence if it is
    /// right-associative, which is how `2^3^2` becomes `2^(3^2)`.
    fn complete_rhs(input: &mut Parser, op: &BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some(next) = Self::peek_op(input) {
            if next.precedence() > precedence
                || (next.precedence() == precedence && next.associativity() == Associativity::Right)
            {
                rhs = Self::parse_expr(input, rhs, next.precedence())?;
            } else {
                break;
            }
        }

        Ok(rhs)
    }

    /// Parses a binary expression with the given left-hand-side, consuming every operator whose
    /// precedence is at least `precedence`.
    ///
    /// If there is no such operator after `lhs`, `lhs` is returned as-is. Once an operator has been
    /// consumed, a missing right-hand-side is an error.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(kind) = Self::peek_op(input) {
            if kind.precedence() < precedence {
                break;
            }

            let op = input.try_parse::<BinOp>()?;
            let rhs = Unary::parse_or_primary(input)?;
            let rhs = Self::complete_rhs(input, &op, rhs)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}

use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::{OpKind, UnaryOp, UnaryOpKind},
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`. Negation binds looser than exponentiation, so `-x^2` is
/// `-(x^2)`, but tighter than multiplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    pub fn parse_or_primary(input: &mut Parser) -> Result<Expr, Error> {
        let is_neg = input.peek_token()
            .is_some_and(|token| UnaryOpKind::from_token(token.kind).is_some());
        if !is_neg {
            return Expr::parse_primary(input);
        }

        input.try_parse_with_fn(|input| {
            let op = input.try_parse::<UnaryOp>()?;
            let operand = Self::parse_or_primary(input)?;
            let operand = Binary::parse_expr(input, operand, Precedence::Exp)?;
            let span = op.span.start..operand.span().end;
            Ok(Expr::Unary(Self {
                operand: Box::new(operand),
                op,
                span,
            }))
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}

use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::OpenParen,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// An expression in parentheses, such as `(x+1)`.
///
/// The parentheses are kept in the tree so that error spans can point at them. They do not
/// change the expression the engine builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    pub expr: Box<Expr>,

    /// Covers both parentheses.
    pub span: Range<usize>,
}

impl Paren {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;

        // `()` is never valid, so there is no point trying other parses
        if let Some(close) = input.peek_token().filter(|token| token.kind == TokenKind::CloseParen) {
            let span = open.span.start..close.span.end;
            return Err(Error::new_fatal(vec![span], kind::EmptyParenthesis));
        }

        let expr = Box::new(input.try_parse::<Expr>()?);
        let close = open.close(input)?;
        Ok(Self { expr, span: open.span.start..close.span.end })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

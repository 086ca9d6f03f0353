use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A function call, such as `dd(x^2,x)`.
///
/// Once the name and the opening parenthesis have been read, every error in the argument list is
/// fatal: a name directly followed by `(` can only be a call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the comma-separated arguments of the call, up to but excluding the closing
    /// parenthesis.
    fn parse_args(input: &mut Parser, name: &LitSym) -> Result<Vec<Expr>, Error> {
        let mut args = Vec::new();
        if input.peek_token().is_some_and(|token| token.kind == TokenKind::CloseParen) {
            return Ok(args);
        }

        loop {
            if let Some(token) = input.peek_token()
                .filter(|token| matches!(token.kind, TokenKind::Comma | TokenKind::CloseParen))
            {
                return Err(Error::new_fatal(vec![token.span.clone()], kind::EmptyArgument {
                    name: name.name.clone(),
                }));
            }

            let arg = input.try_parse::<Expr>().map_err(|mut err| {
                err.fatal = true;
                err
            })?;
            args.push(arg);

            if input.try_parse::<Comma>().is_err() {
                return Ok(args);
            }
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let args = Self::parse_args(input, &name)?;
        let close_paren = open_paren.close(input)?;

        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            arg.fmt(f)?;
        }
        write!(f, ")")
    }
}

pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares punctuation that must appear as exactly one token of the same-named [`TokenKind`].
macro_rules! punctuation {
    ($($name:ident)*) => {$(
        #[derive(Clone, Debug, PartialEq)]
        pub(crate) struct $name {
            pub(crate) span: Range<usize>,
        }

        impl Parse for $name {
            fn parse(input: &mut Parser) -> Result<Self, Error> {
                input.expect(&[TokenKind::$name]).map(|token| Self { span: token.span })
            }
        }
    )*};
}

punctuation!(Comma OpenParen CloseParen);

impl OpenParen {
    /// Reads the `)` matching this parenthesis. A missing `)` is fatal and points at `self`.
    pub(crate) fn close(&self, input: &mut Parser) -> Result<CloseParen, Error> {
        input.try_parse::<CloseParen>().map_err(|_| {
            Error::new_fatal(vec![self.span.clone()], kind::UnclosedParenthesis { opening: true })
        })
    }
}

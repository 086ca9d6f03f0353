use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use rug::{ops::Pow, Integer, Rational};
use std::{fmt, ops::Range};

/// A number literal. Integers and decimals are both read exactly, as a [`Rational`]: `0.1` is
/// `1/10`, not the closest binary fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct LitNum {
    /// The value of the number literal.
    pub value: Rational,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitNum {
    /// Reads the exact value of an integer or decimal lexeme, such as `12`, `3.25`, `.5` or `4.`.
    fn read(lexeme: &str) -> Option<Rational> {
        let (int_part, frac_part) = lexeme.split_once('.').unwrap_or((lexeme, ""));
        let digits = format!("{}{}", int_part, frac_part);
        if digits.is_empty() {
            return None;
        }

        let numer = Integer::from_str_radix(&digits, 10).ok()?;
        let denom = Integer::from(10).pow(frac_part.len() as u32);
        Some(Rational::from((numer, denom)))
    }
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(&[TokenKind::Int, TokenKind::Float])?;
        match Self::read(token.lexeme) {
            Some(value) => Ok(Self { value, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::InvalidNumber {
                lexeme: token.lexeme.to_string(),
            })),
        }
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(&[TokenKind::Name])?;
        Ok(Self {
            name: token.lexeme.to_owned(),
            span: token.span,
        })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value in an Oasis expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.try_parse::<LitNum>() {
            Ok(num) => Ok(Literal::Number(num)),
            Err(err) if err.fatal => Err(err),
            Err(_) => input.try_parse::<LitSym>()
                .map(Literal::Symbol)
                .map_err(|err| match input.peek_token() {
                    Some(token) => Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                        expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name],
                        found: token.kind,
                    }),
                    None => err,
                }),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}

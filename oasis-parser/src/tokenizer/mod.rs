pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Lexes the input lazily.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Lexes the whole input up front, so the parser can backtrack freely.
///
/// Lexing stops at the first byte sequence that is not a token. If the last span ends before
/// the end of the input, something was left over.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    std::iter::from_fn(|| {
        let kind = lexer.next()?.ok()?;
        Some(Token { span: lexer.span(), kind, lexeme: lexer.slice() })
    })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_and_calls() {
        compare_tokens(
            "2x^2 - dd(x,x)",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "dd"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::Comma, ","),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn alternate_operators() {
        compare_tokens(
            "3.5**2 × .5 ÷ y $",
            [
                (TokenKind::Float, "3.5"),
                (TokenKind::DoubleStar, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Times, "×"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, ".5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Divide, "÷"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }
}

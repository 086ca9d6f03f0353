//! Rewrites free-text input into the canonical form accepted by the [`Parser`].
//!
//! [`Parser`]: crate::parser::Parser

use crate::tokenizer::{tokenize_complete, TokenKind};

/// Names of the functions the engine knows how to evaluate, in canonical spelling.
pub const FUNCTIONS: &[&str] = &["dd", "in", "log", "ln", "sqrt", "sin", "cos", "tan"];

/// Alternate spellings of the known functions, mapped to their canonical spelling.
const ALIASES: &[(&str, &str)] = &[
    ("derivative", "dd"),
    ("diff", "dd"),
    ("integral", "in"),
    ("integrate", "in"),
];

/// Returns the canonical spelling of the function with the given name, if the name (compared
/// case-insensitively) is a known function or an alias of one.
pub fn canonical_function(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    FUNCTIONS.iter()
        .find(|func| **func == lower)
        .copied()
        .or_else(|| ALIASES.iter().find(|(alias, _)| *alias == lower).map(|(_, func)| *func))
}

/// How a piece of normalized output participates in implicit multiplication.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Role {
    /// A value that can be multiplied by whatever value comes next: a number, a symbol, or `)`.
    Operand,

    /// The name of a function that is about to be called.
    FuncHead,

    /// `(`, which starts a value but cannot end one.
    Open,

    /// An operator or a comma.
    Other,
}

/// The normalized text being built, along with the role of the last piece pushed to it.
struct Output {
    text: String,
    last_role: Role,
}

impl Output {
    /// Appends a piece of output. If the piece starts a value and directly follows another value,
    /// a `*` is inserted between the two.
    fn push(&mut self, piece: &str, role: Role, starts_value: bool) {
        if self.last_role == Role::Operand && starts_value {
            self.text.push('*');
        }
        self.text.push_str(piece);
        self.last_role = role;
    }
}

/// Normalizes a raw expression into the canonical text the parser accepts.
///
/// - Whitespace is removed.
/// - `**` becomes `^`; `×` and `·` become `*`; `÷` becomes `/`; `−` becomes `-`.
/// - Known function names and their aliases are canonicalized (`Log(` becomes `log(`, `diff(`
///   becomes `dd(`). Any other name with two or more letters that is directly followed by `(` is
///   kept as a function call.
/// - Any other multi-letter name is split into single-letter symbols (`xy` becomes `x*y`).
/// - Implicit multiplication is made explicit (`2x(x+1)` becomes `2*x*(x+1)`).
///
/// The function never fails. If the input contains anything the tokenizer does not recognize,
/// the input is returned unchanged, and parsing it will fail. Normalizing already-normalized text
/// returns it unchanged.
pub fn preprocess(input: &str) -> String {
    let tokens = tokenize_complete(input);
    let covered = tokens.last().map_or(0, |token| token.span.end);
    if covered != input.len() || tokens.iter().any(|token| token.kind == TokenKind::Symbol) {
        return input.to_string();
    }

    let tokens = tokens.iter()
        .filter(|token| !token.is_whitespace())
        .collect::<Vec<_>>();

    let mut output = Output {
        text: String::with_capacity(input.len()),
        last_role: Role::Other,
    };

    for (i, token) in tokens.iter().enumerate() {
        let next_is_paren = tokens.get(i + 1).is_some_and(|next| next.kind == TokenKind::OpenParen);
        match token.kind {
            TokenKind::Name if next_is_paren => {
                if let Some(func) = canonical_function(token.lexeme) {
                    output.push(func, Role::FuncHead, true);
                } else if token.lexeme.len() > 1 {
                    output.push(token.lexeme, Role::FuncHead, true);
                } else {
                    output.push(token.lexeme, Role::Operand, true);
                }
            },
            TokenKind::Name => {
                let mut buf = [0; 4];
                for c in token.lexeme.chars() {
                    output.push(c.encode_utf8(&mut buf), Role::Operand, true);
                }
            },
            TokenKind::Int | TokenKind::Float => output.push(token.lexeme, Role::Operand, true),
            TokenKind::CloseParen => output.push(")", Role::Operand, false),
            // `(` after a function name opens its argument list; after a value, it multiplies
            TokenKind::OpenParen => output.push("(", Role::Open, true),
            TokenKind::Add => output.push("+", Role::Other, false),
            TokenKind::Sub | TokenKind::Minus => output.push("-", Role::Other, false),
            TokenKind::Mul | TokenKind::Times => output.push("*", Role::Other, false),
            TokenKind::Div | TokenKind::Divide => output.push("/", Role::Other, false),
            TokenKind::Exp | TokenKind::DoubleStar => output.push("^", Role::Other, false),
            TokenKind::Comma => output.push(",", Role::Other, false),
            TokenKind::Whitespace | TokenKind::Symbol => (),
        }
    }

    output.text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn implicit_multiplication() {
        assert_eq!(preprocess("2x+3x"), "2*x+3*x");
        assert_eq!(preprocess("2(x+1)"), "2*(x+1)");
        assert_eq!(preprocess("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(preprocess("x(x+1)"), "x*(x+1)");
        assert_eq!(preprocess("3 4"), "3*4");
        assert_eq!(preprocess("(x)2"), "(x)*2");
    }

    #[test]
    fn split_multi_letter_names() {
        assert_eq!(preprocess("xy"), "x*y");
        assert_eq!(preprocess("2ab^2"), "2*a*b^2");
    }

    #[test]
    fn canonical_function_names() {
        assert_eq!(preprocess("dd(x^2, x)"), "dd(x^2,x)");
        assert_eq!(preprocess("LOG(10,100)"), "log(10,100)");
        assert_eq!(preprocess("diff(x^2,x)"), "dd(x^2,x)");
        assert_eq!(preprocess("Integrate(2x,x)"), "in(2*x,x)");
        assert_eq!(preprocess("3sin(x)"), "3*sin(x)");
        assert_eq!(preprocess("foo(x)"), "foo(x)");
    }

    #[test]
    fn alternate_operators() {
        assert_eq!(preprocess("x**2 × 3 ÷ 4 − 1"), "x^2*3/4-1");
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("   \t "), "");
    }

    #[test]
    fn unrecognized_input_is_unchanged() {
        assert_eq!(preprocess("2x $ 3"), "2x $ 3");
        assert_eq!(preprocess("x = 2"), "x = 2");
    }

    #[test]
    fn incomplete_input_is_still_normalized() {
        assert_eq!(preprocess("2x+"), "2*x+");
        assert_eq!(preprocess("dd(x^2,"), "dd(x^2,");
    }

    #[test]
    fn idempotent() {
        for input in ["2x+3x", "dd(x^2,x)", "xy(2 + z)", "log(10, 100)", "x**2", "2x $", "  ", "3.5x"] {
            let once = preprocess(input);
            assert_eq!(preprocess(&once), once, "input: {input:?}");
        }
    }
}

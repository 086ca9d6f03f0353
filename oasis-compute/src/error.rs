//! Errors that can occur while simplifying an expression.

use thiserror::Error;

/// Formats the "did you mean" part of an unknown function error.
fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|name| format!("; did you mean `{}`?", name))
        .unwrap_or_default()
}

/// Formats a count of arguments, such as `1 argument` or `2 arguments`.
fn arguments(count: &usize) -> String {
    if *count == 1 {
        "1 argument".to_string()
    } else {
        format!("{} arguments", count)
    }
}

/// An error that stops simplification. The [`Display`](std::fmt::Display) output is the message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A number was divided by zero, including through a negative power of zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `0^0` was evaluated.
    #[error("`0^0` is undefined")]
    ZeroToZero,

    /// A function with no known definition was called.
    #[error("unknown function `{name}`{}", did_you_mean(.suggestion))]
    UnknownFunction {
        name: String,
        suggestion: Option<&'static str>,
    },

    /// A function was called with the wrong number of arguments.
    #[error("`{name}` takes {}, but {} were given", arguments(.expected), .found)]
    WrongArity {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// A function was evaluated outside of its domain.
    #[error("`{function}` is undefined here: {reason}")]
    Domain {
        function: &'static str,
        reason: &'static str,
    },

    /// The variable argument of `dd` or `in` was not a single variable.
    #[error("the last argument of `{function}` must be a variable, but found `{found}`")]
    ExpectedVariable {
        function: &'static str,
        found: String,
    },

    /// The derivative of the expression is not known.
    #[error("cannot differentiate `{expr}` with respect to `{var}`")]
    NotDifferentiable {
        expr: String,
        var: String,
    },

    /// No antiderivative of the expression could be found.
    #[error("cannot find an antiderivative of `{expr}` with respect to `{var}`")]
    NotIntegrable {
        expr: String,
        var: String,
    },

    /// A numeric power would be too large to compute exactly.
    #[error("the power `{0}` is too large to compute exactly")]
    ExponentTooLarge(String),

    /// Expanding products of sums would produce more terms than the given limit.
    #[error("expanding this expression would produce more than {0} terms")]
    ExpressionTooLarge(u64),

    /// Simplification kept rewriting the expression without settling.
    #[error("simplification did not settle after {0} passes")]
    NoFixpoint(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn unknown_function_suggestion() {
        let err = Error::UnknownFunction { name: "sinn".to_string(), suggestion: Some("sin") };
        assert_eq!(err.to_string(), "unknown function `sinn`; did you mean `sin`?");

        let err = Error::UnknownFunction { name: "foo".to_string(), suggestion: None };
        assert_eq!(err.to_string(), "unknown function `foo`");
    }

    #[test]
    fn wrong_arity_plural() {
        let err = Error::WrongArity { name: "ln", expected: 1, found: 2 };
        assert_eq!(err.to_string(), "`ln` takes 1 argument, but 2 were given");

        let err = Error::WrongArity { name: "dd", expected: 2, found: 1 };
        assert_eq!(err.to_string(), "`dd` takes 2 arguments, but 1 were given");
    }
}

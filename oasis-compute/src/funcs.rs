//! The functions that can be called in an Oasis expression.

use crate::error::Error;
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A function known to the simplifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Func {
    /// The canonical name of the function.
    pub name: &'static str,

    /// The number of arguments the function takes.
    pub arity: usize,

    /// The signature of the function, as shown in help text.
    pub signature: &'static str,

    /// A short description of the function.
    pub description: &'static str,
}

impl Func {
    /// Returns an error if the function cannot be called with the given number of arguments.
    pub fn check_arity(&self, found: usize) -> Result<(), Error> {
        if found == self.arity {
            Ok(())
        } else {
            Err(Error::WrongArity { name: self.name, expected: self.arity, found })
        }
    }
}

static FUNCS: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    [
        Func { name: "dd", arity: 2, signature: "dd(f, x)", description: "derivative of f with respect to x" },
        Func { name: "in", arity: 2, signature: "in(f, x)", description: "antiderivative of f with respect to x" },
        Func { name: "log", arity: 2, signature: "log(b, a)", description: "logarithm of a in base b" },
        Func { name: "ln", arity: 1, signature: "ln(a)", description: "natural logarithm of a" },
        Func { name: "sqrt", arity: 1, signature: "sqrt(a)", description: "square root of a" },
        Func { name: "sin", arity: 1, signature: "sin(a)", description: "sine of a" },
        Func { name: "cos", arity: 1, signature: "cos(a)", description: "cosine of a" },
        Func { name: "tan", arity: 1, signature: "tan(a)", description: "tangent of a" },
    ]
        .into_iter()
        .map(|func| (func.name, func))
        .collect()
});

/// Returns the function with the given name.
///
/// If there is no such function, the error suggests the known function with the most similar
/// name, if any is close enough.
pub fn get(name: &str) -> Result<Func, Error> {
    FUNCS.get(name).copied().ok_or_else(|| Error::UnknownFunction {
        name: name.to_string(),
        suggestion: similar(name),
    })
}

/// Returns the name of the known function most similar to the given name, if its edit distance is
/// less than 3.
pub fn similar(name: &str) -> Option<&'static str> {
    FUNCS.keys()
        .map(|candidate| (levenshtein(candidate, name), *candidate))
        .filter(|(distance, _)| *distance < 3)
        .min()
        .map(|(_, candidate)| candidate)
}

/// Returns every known function, sorted by name.
pub fn all() -> Vec<Func> {
    let mut funcs = FUNCS.values().copied().collect::<Vec<_>>();
    funcs.sort_by_key(|func| func.name);
    funcs
}

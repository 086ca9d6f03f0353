//! Rendering of [`Expr`]s as display markup.
//!
//! Two formats are supported:
//!
//! - plain text, through the [`Display`](std::fmt::Display) implementation of [`Expr`]. The
//!   output is valid input, so `x^2+3x-1` can be typed back in;
//! - presentation MathML, through the [`MathMl`] trait.
//!
//! Both renderers share the decomposition of sums into signed terms and of products into
//! fractions, implemented in this module.

pub mod mathml;
pub mod text;

use crate::primitive::{is_integer, rat};
use crate::symbolic::expr::{Expr, Primary};
use rug::{Integer, Rational};

pub use mathml::{MathMl, MathMlFormatter};

/// The format of the markup produced by [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MarkupFormat {
    /// Plain infix text, which can be entered again as input.
    Text,

    /// Presentation MathML, wrapped in a `<math>` element.
    #[default]
    MathMl,
}

/// Renders the expression in the given format.
pub fn render(expr: &Expr, format: MarkupFormat) -> String {
    match format {
        MarkupFormat::Text => expr.to_string(),
        MarkupFormat::MathMl => format!(
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">{}</math>",
            expr.as_mathml(),
        ),
    }
}

/// Splits a term of a sum into its sign and magnitude, so that `x-2y` can be shown with a minus
/// sign instead of `x+(-2)y`.
pub(crate) fn split_sign(term: &Expr) -> (bool, Expr) {
    match term {
        Expr::Primary(Primary::Number(n)) if n.cmp0().is_lt() => {
            (true, Expr::Primary(Primary::Number(-n.clone())))
        },
        Expr::Mul(factors) => match factors.split_first() {
            Some((first, rest)) if first.as_number().is_some_and(|n| n.cmp0().is_lt()) => {
                let mut magnitude = Vec::with_capacity(factors.len());
                if !first.as_number().is_some_and(|n| *n == -1) || rest.is_empty() {
                    magnitude.push(-first.clone());
                }
                magnitude.extend(rest.iter().cloned());
                (true, Expr::Mul(magnitude).downgrade())
            },
            _ => (false, term.clone()),
        },
        _ => (false, term.clone()),
    }
}

/// A product split into the parts shown above and below a fraction bar.
///
/// Only a leading numeric factor is treated as the coefficient. Other numeric factors are kept in
/// place, so that an unsimplified product such as `2*3*x` is shown as entered.
#[derive(Debug, Default)]
pub(crate) struct Fraction {
    /// Whether the coefficient is negative.
    pub negative: bool,

    /// The numerator of the coefficient, if it is not 1.
    pub numer_coeff: Option<Integer>,

    /// The factors of the numerator.
    pub numer: Vec<Expr>,

    /// The denominator of the coefficient, if it is not 1.
    pub denom_coeff: Option<Integer>,

    /// The factors of the denominator, with their exponents made positive.
    pub denom: Vec<Expr>,
}

impl Fraction {
    /// Splits the factors of a product.
    pub fn split(factors: &[Expr]) -> Self {
        let mut fraction = Fraction::default();
        let mut factors = factors.iter().peekable();

        if let Some(coeff) = factors.peek().and_then(|factor| factor.as_number()) {
            fraction.negative = coeff.cmp0().is_lt();
            let numer = coeff.numer().clone().abs();
            if numer != 1 || factors.len() == 1 {
                fraction.numer_coeff = Some(numer);
            }
            if !is_integer(coeff) {
                fraction.denom_coeff = Some(coeff.denom().clone());
            }
            factors.next();
        }

        for factor in factors {
            match reciprocal(factor) {
                Some(denom) => fraction.denom.push(denom),
                None => fraction.numer.push(factor.clone()),
            }
        }

        fraction
    }

    /// Returns true if the product has something below the fraction bar.
    pub fn has_denom(&self) -> bool {
        self.denom_coeff.is_some() || !self.denom.is_empty()
    }
}

/// If the factor is a power with a negative numeric exponent, returns the same power with the
/// exponent negated, so that `x^-2` gives `x^2` and `x^-1` gives `x`.
pub(crate) fn reciprocal(factor: &Expr) -> Option<Expr> {
    let Expr::Exp(base, exp) = factor else {
        return None;
    };
    let exp = exp.as_number().filter(|n| n.cmp0().is_lt())?;
    if *exp == -1 {
        Some((**base).clone())
    } else {
        Some(Expr::pow((**base).clone(), Expr::Primary(Primary::Number(-exp.clone()))))
    }
}

/// Returns true if the exponent is `1/2`, which is shown as a square root.
pub(crate) fn is_half(exp: &Expr) -> bool {
    exp.as_number().is_some_and(|n| *n == rat((1, 2)))
}

/// Returns true if the base of a power must be parenthesized.
pub(crate) fn base_needs_parens(base: &Expr) -> bool {
    match base {
        Expr::Primary(Primary::Number(n)) => !is_simple_number(n),
        Expr::Primary(_) => false,
        Expr::Add(_) | Expr::Mul(_) | Expr::Exp(..) => true,
    }
}

/// Returns true if the number is a non-negative integer.
pub(crate) fn is_simple_number(n: &Rational) -> bool {
    is_integer(n) && n.cmp0().is_ge()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn negative_terms() {
        let term = Expr::Mul(vec![Expr::num(-3), Expr::sym("x")]);
        assert_eq!(split_sign(&term), (true, Expr::Mul(vec![Expr::num(3), Expr::sym("x")])));

        let term = Expr::Mul(vec![Expr::num(-1), Expr::sym("x")]);
        assert_eq!(split_sign(&term), (true, Expr::sym("x")));

        assert_eq!(split_sign(&Expr::num(-4)), (true, Expr::num(4)));
        assert_eq!(split_sign(&Expr::sym("y")), (false, Expr::sym("y")));
    }

    #[test]
    fn fraction_parts() {
        let factors = [
            Expr::num((-3, 4)),
            Expr::sym("x"),
            Expr::pow(Expr::sym("y"), Expr::num(-2)),
        ];
        let fraction = Fraction::split(&factors);
        assert!(fraction.negative);
        assert_eq!(fraction.numer_coeff, Some(Integer::from(3)));
        assert_eq!(fraction.numer, vec![Expr::sym("x")]);
        assert_eq!(fraction.denom_coeff, Some(Integer::from(4)));
        assert_eq!(fraction.denom, vec![Expr::pow(Expr::sym("y"), Expr::num(2))]);
    }
}

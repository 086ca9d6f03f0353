//! Presentation MathML rendering of expressions.

use crate::primitive::is_integer;
use crate::symbolic::expr::{Expr, Primary};
use rug::{Integer, Rational};
use std::fmt::{self, Display, Formatter};
use super::{base_needs_parens, is_half, reciprocal, split_sign, Fraction};

/// A trait for types that can be formatted as presentation MathML.
pub trait MathMl {
    /// Format the value as MathML, without the enclosing `<math>` element.
    fn fmt_mathml(&self, f: &mut Formatter) -> fmt::Result;

    /// Wraps the value in a [`MathMlFormatter`], which implements [`Display`].
    fn as_mathml(&self) -> MathMlFormatter<'_, Self> {
        MathMlFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`MathMl`].
pub struct MathMlFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for MathMlFormatter<'_, T>
where
    T: MathMl,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt_mathml(f)
    }
}

/// Invisible multiplication, used between a coefficient and a symbol.
const INVISIBLE_TIMES: &str = "<mo>&#x2062;</mo>";

/// A visible multiplication dot, used where juxtaposition would be ambiguous.
const DOT: &str = "<mo>&#x22C5;</mo>";

/// Formats a rational number.
fn fmt_number(f: &mut Formatter, n: &Rational) -> fmt::Result {
    if n.cmp0().is_lt() {
        write!(f, "<mo>-</mo>")?;
    }

    if is_integer(n) {
        write!(f, "<mn>{}</mn>", n.numer().clone().abs())
    } else {
        write!(f, "<mfrac><mn>{}</mn><mn>{}</mn></mfrac>", n.numer().clone().abs(), n.denom())
    }
}

/// Formats an expression surrounded by parentheses.
fn fmt_parens(f: &mut Formatter, expr: &Expr) -> fmt::Result {
    write!(f, "<mrow><mo>(</mo>{}<mo>)</mo></mrow>", expr.as_mathml())
}

/// Formats a list of function arguments, surrounded by parentheses.
fn fmt_args(f: &mut Formatter, args: &[Expr]) -> fmt::Result {
    write!(f, "<mo>(</mo>")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, "<mo>,</mo>")?;
        }
        arg.fmt_mathml(f)?;
    }
    write!(f, "<mo>)</mo>")
}

/// Formats a call, using standard notation for derivatives, integrals, logarithms and roots.
fn fmt_call(f: &mut Formatter, name: &str, args: &[Expr]) -> fmt::Result {
    match (name, args) {
        ("dd", [expr, var]) => {
            write!(f, "<mrow><mfrac><mi>d</mi><mrow><mi>d</mi>{}</mrow></mfrac>", var.as_mathml())?;
            fmt_parens(f, expr)?;
            write!(f, "</mrow>")
        },
        ("in", [expr, var]) => write!(
            f,
            "<mrow><mo>&#x222B;</mo>{}<mo>&#x2062;</mo><mi>d</mi>{}</mrow>",
            expr.as_mathml(),
            var.as_mathml(),
        ),
        ("log", [base, arg]) => {
            write!(f, "<mrow><msub><mi>log</mi>{}</msub>", base.as_mathml())?;
            fmt_args(f, std::slice::from_ref(arg))?;
            write!(f, "</mrow>")
        },
        ("sqrt", [arg]) => write!(f, "<msqrt>{}</msqrt>", arg.as_mathml()),
        _ => {
            write!(f, "<mrow><mi>{}</mi>", name)?;
            fmt_args(f, args)?;
            write!(f, "</mrow>")
        },
    }
}

/// Formats one factor of a product.
fn fmt_factor(f: &mut Formatter, factor: &Expr) -> fmt::Result {
    match factor {
        Expr::Primary(Primary::Number(n)) if n.cmp0().is_lt() => fmt_parens(f, factor),
        Expr::Add(_) | Expr::Mul(_) => fmt_parens(f, factor),
        _ => factor.fmt_mathml(f),
    }
}

/// Returns true if the factor is shown starting with a number, which needs a visible
/// multiplication sign before it.
fn starts_with_number(factor: &Expr) -> bool {
    match factor {
        Expr::Primary(Primary::Number(_)) => true,
        Expr::Exp(base, exp) => !is_half(exp) && base.is_number(),
        _ => false,
    }
}

/// Formats a list of factors with an optional leading coefficient.
fn fmt_factors(f: &mut Formatter, coeff: Option<&Integer>, factors: &[Expr]) -> fmt::Result {
    write!(f, "<mrow>")?;
    let mut previous = false;
    if let Some(coeff) = coeff {
        write!(f, "<mn>{}</mn>", coeff)?;
        previous = true;
    } else if factors.is_empty() {
        write!(f, "<mn>1</mn>")?;
    }

    for factor in factors {
        if previous {
            if starts_with_number(factor) {
                write!(f, "{}", DOT)?;
            } else {
                write!(f, "{}", INVISIBLE_TIMES)?;
            }
        }
        fmt_factor(f, factor)?;
        previous = true;
    }
    write!(f, "</mrow>")
}

/// Formats a product, putting factors with negative exponents in the denominator of a fraction.
fn fmt_product(f: &mut Formatter, factors: &[Expr]) -> fmt::Result {
    let fraction = Fraction::split(factors);
    write!(f, "<mrow>")?;
    if fraction.negative {
        write!(f, "<mo>-</mo>")?;
    }

    if fraction.has_denom() {
        write!(f, "<mfrac>")?;
        fmt_factors(f, fraction.numer_coeff.as_ref(), &fraction.numer)?;
        fmt_factors(f, fraction.denom_coeff.as_ref(), &fraction.denom)?;
        write!(f, "</mfrac>")?;
    } else {
        fmt_factors(f, fraction.numer_coeff.as_ref(), &fraction.numer)?;
    }
    write!(f, "</mrow>")
}

impl MathMl for Primary {
    fn fmt_mathml(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => fmt_number(f, n),
            Self::Symbol(sym) => write!(f, "<mi>{}</mi>", sym),
            Self::Call(name, args) => fmt_call(f, name, args),
        }
    }
}

impl MathMl for Expr {
    fn fmt_mathml(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => primary.fmt_mathml(f),
            Self::Add(terms) => {
                write!(f, "<mrow>")?;
                for (i, term) in terms.iter().enumerate() {
                    let (negative, magnitude) = split_sign(term);
                    if negative {
                        write!(f, "<mo>-</mo>")?;
                    } else if i > 0 {
                        write!(f, "<mo>+</mo>")?;
                    }

                    if matches!(magnitude, Expr::Add(_)) {
                        fmt_parens(f, &magnitude)?;
                    } else {
                        magnitude.fmt_mathml(f)?;
                    }
                }
                write!(f, "</mrow>")
            },
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(base, exp) => {
                if is_half(exp) {
                    return write!(f, "<msqrt>{}</msqrt>", base.as_mathml());
                }

                if reciprocal(self).is_some() {
                    return fmt_product(f, std::slice::from_ref(self));
                }

                write!(f, "<msup>")?;
                if base_needs_parens(base) {
                    fmt_parens(f, base)?;
                } else {
                    base.fmt_mathml(f)?;
                }
                write!(f, "<mrow>{}</mrow></msup>", exp.as_mathml())
            },
        }
    }
}

//! Plain-text rendering of expressions.

use crate::symbolic::expr::{Expr, Primary};
use std::fmt::{self, Display, Formatter};
use super::{base_needs_parens, is_half, is_simple_number, reciprocal, split_sign, Fraction};

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Formats an expression that is one factor of a product, adding parentheses where the factor
/// would otherwise be read differently.
fn fmt_factor(f: &mut Formatter<'_>, factor: &Expr) -> fmt::Result {
    let needs_parens = match factor {
        Expr::Primary(Primary::Number(n)) => !is_simple_number(n),
        Expr::Add(_) | Expr::Mul(_) => true,
        _ => false,
    };

    if needs_parens {
        write!(f, "({})", factor)
    } else {
        write!(f, "{}", factor)
    }
}

/// Formats a list of factors with an optional leading coefficient. The coefficient is juxtaposed
/// with the first factor (`5x`) unless that factor starts with a digit; other factors are
/// separated by `*`.
fn fmt_factors(f: &mut Formatter<'_>, coeff: Option<&rug::Integer>, factors: &[Expr]) -> fmt::Result {
    let factors = factors.iter()
        .map(|factor| FactorDisplay(factor).to_string())
        .collect::<Vec<_>>();

    match coeff {
        Some(coeff) => {
            write!(f, "{}", coeff)?;
            if factors.first().is_some_and(|first| first.starts_with(|c: char| c.is_ascii_digit())) {
                write!(f, "*")?;
            }
        },
        None if factors.is_empty() => write!(f, "1")?,
        None => (),
    }

    write!(f, "{}", factors.join("*"))
}

/// Wrapper that formats an expression with [`fmt_factor`].
struct FactorDisplay<'a>(&'a Expr);

impl Display for FactorDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_factor(f, self.0)
    }
}

/// Formats a product, putting factors with negative exponents below a `/`.
fn fmt_product(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let fraction = Fraction::split(factors);
    if fraction.negative {
        write!(f, "-")?;
    }

    fmt_factors(f, fraction.numer_coeff.as_ref(), &fraction.numer)?;

    if fraction.has_denom() {
        write!(f, "/")?;
        let count = fraction.denom.len() + usize::from(fraction.denom_coeff.is_some());
        if count > 1 {
            write!(f, "(")?;
            fmt_factors(f, fraction.denom_coeff.as_ref(), &fraction.denom)?;
            write!(f, ")")?;
        } else {
            fmt_factors(f, fraction.denom_coeff.as_ref(), &fraction.denom)?;
        }
    }

    Ok(())
}

/// Formats a power. Square roots are shown as `sqrt(x)`, and negative numeric exponents as
/// fractions.
fn fmt_power(f: &mut Formatter<'_>, base: &Expr, exp: &Expr) -> fmt::Result {
    if is_half(exp) {
        return write!(f, "sqrt({})", base);
    }

    let power = Expr::pow(base.clone(), exp.clone());
    if reciprocal(&power).is_some() {
        return fmt_product(f, std::slice::from_ref(&power));
    }

    if base_needs_parens(base) {
        write!(f, "({})", base)?;
    } else {
        write!(f, "{}", base)?;
    }

    match exp {
        Expr::Primary(Primary::Number(n)) if is_simple_number(n) => write!(f, "^{}", exp),
        Expr::Primary(Primary::Symbol(_)) => write!(f, "^{}", exp),
        _ => write!(f, "^({})", exp),
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    let (negative, magnitude) = split_sign(term);
                    if negative {
                        write!(f, "-")?;
                    } else if i > 0 {
                        write!(f, "+")?;
                    }

                    if matches!(magnitude, Expr::Add(_)) {
                        write!(f, "({})", magnitude)?;
                    } else {
                        write!(f, "{}", magnitude)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(base, exp) => fmt_power(f, base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use oasis_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn text(input: &str) -> String {
        let mut parser = Parser::new(input);
        Expr::from(parser.try_parse_full::<AstExpr>().unwrap()).to_string()
    }

    #[test]
    fn polynomial() {
        assert_eq!(text("x^2+3*x-1"), "x^2+3x-1");
        assert_eq!(text("2*x+3*x"), "2x+3x");
        assert_eq!(text("-x+2"), "-x+2");
    }

    #[test]
    fn fractions() {
        assert_eq!(text("x/2"), "x/2");
        assert_eq!(text("1/x"), "1/x");
        assert_eq!(text("x/(2*y)"), "x/(2y)");
        assert_eq!(text("1/(x+1)^2"), "1/(x+1)^2");
        assert_eq!(text("2^-1"), "1/2");
        assert_eq!(text("-1/2"), "-1/2");
    }

    #[test]
    fn powers_and_calls() {
        assert_eq!(text("(x+1)^2"), "(x+1)^2");
        assert_eq!(text("x^(n+1)"), "x^(n+1)");
        assert_eq!(text("2*3^x"), "2*3^x");
        assert_eq!(text("x^(1/2)"), "x^(1/2)");
        assert_eq!(Expr::pow(Expr::sym("x"), Expr::num((1, 2))).to_string(), "sqrt(x)");
        assert_eq!(text("dd(x^2,x)"), "dd(x^2,x)");
        assert_eq!(text("-(x+1)"), "-(x+1)");
    }

    #[test]
    fn numbers() {
        let expr = Expr::num((3, 4));
        assert_eq!(expr.to_string(), "3/4");
        assert_eq!(Expr::Mul(vec![Expr::num((3, 4)), Expr::sym("x")]).to_string(), "3x/4");
    }
}

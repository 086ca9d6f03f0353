//! Symbolic integration.
//!
//! [`integral`] finds antiderivatives by matching a small table of forms: constants, powers of the
//! variable, `sin`, `cos`, `ln`, exponentials with a constant base, and sums and constant multiples
//! of those. The constant of integration is omitted.

use crate::error::Error;
use super::expr::{Expr, Primary};

fn not_integrable(expr: &Expr, var: &str) -> Error {
    Error::NotIntegrable {
        expr: expr.to_string(),
        var: var.to_string(),
    }
}

/// `∫ x^n dx = x^(n+1)/(n+1)`, and `∫ x^-1 dx = ln(x)`
fn power_rule(x: &Expr, exp: &Expr) -> Expr {
    match exp.as_number() {
        Some(n) if *n == -1 => Expr::call("ln", vec![x.clone()]),
        Some(n) => {
            let next = n.clone() + 1u32;
            Expr::num(next.clone().recip()) * Expr::pow(x.clone(), Expr::num(next))
        },
        None => {
            let next = exp.clone() + Expr::num(1);
            Expr::pow(next.clone(), Expr::num(-1)) * Expr::pow(x.clone(), next)
        },
    }
}

/// Integrates a call to a known function of the variable itself.
fn call_rule(expr: &Expr, name: &str, args: &[Expr], var: &str) -> Result<Expr, Error> {
    let x = Expr::sym(var);
    match (name, args) {
        // ∫ sin(x) dx = -cos(x)
        ("sin", [arg]) if *arg == x => Ok(-Expr::call("cos", vec![x])),
        // ∫ cos(x) dx = sin(x)
        ("cos", [arg]) if *arg == x => Ok(Expr::call("sin", vec![x])),
        // ∫ ln(x) dx = x ln(x) - x
        ("ln", [arg]) if *arg == x => {
            Ok(x.clone() * Expr::call("ln", vec![x.clone()]) + -x)
        },
        // ∫ sqrt(x) dx = 2/3 x^(3/2)
        ("sqrt", [arg]) if *arg == x => Ok(power_rule(&x, &Expr::num((1, 2)))),
        _ => Err(not_integrable(expr, var)),
    }
}

/// Computes an antiderivative of the expression with respect to the variable `var`.
///
/// Fails with [`Error::NotIntegrable`] if the expression does not match any known form. The
/// expression should be simplified first: `x*x` is only recognized as `x^2`.
pub fn integral(expr: &Expr, var: &str) -> Result<Expr, Error> {
    let x = Expr::sym(var);

    // ∫ c dx = cx
    if !expr.contains_symbol(var) {
        return Ok(expr.clone() * x);
    }

    match expr {
        Expr::Primary(Primary::Number(_) | Primary::Symbol(_)) => Ok(power_rule(&x, &Expr::num(1))),
        Expr::Primary(Primary::Call(name, args)) => call_rule(expr, name, args, var),

        // ∫ (f + g) dx = ∫ f dx + ∫ g dx
        Expr::Add(terms) => terms.iter()
            .map(|term| integral(term, var))
            .collect::<Result<Vec<_>, _>>()
            .map(Expr::Add),

        // ∫ c f dx = c ∫ f dx
        Expr::Mul(factors) => {
            let (constant, varying): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| !factor.contains_symbol(var));
            match varying.as_slice() {
                [f] => Ok(Expr::Mul(constant) * integral(f, var)?),
                _ => Err(not_integrable(expr, var)),
            }
        },

        Expr::Exp(base, exp) => {
            if **base == x && !exp.contains_symbol(var) {
                Ok(power_rule(&x, exp))
            } else if !base.contains_symbol(var) && **exp == x {
                // ∫ b^x dx = b^x / ln(b)
                Ok(expr.clone() * Expr::pow(Expr::call("ln", vec![(**base).clone()]), Expr::num(-1)))
            } else {
                Err(not_integrable(expr, var))
            }
        },
    }
}

//! Symbolic differentiation.
//!
//! [`derivative`] applies the sum, product, power and chain rules directly to the expression
//! tree. The result is not simplified; `dd(x^2, x)` first becomes `2*x^(2+(-1))`, which the
//! simplifier then reduces to `2x`.

use crate::error::Error;
use crate::primitive::rat;
use super::expr::{Expr, Primary};

/// Builds a product, dropping factors of one and collapsing to zero if any factor is zero.
#[derive(Default)]
struct MulBuilder(Vec<Expr>);

impl MulBuilder {
    fn mul(&mut self, factor: Expr) {
        if self.0.first().is_some_and(Expr::is_zero) {
            return;
        }
        if factor.is_zero() {
            self.0 = vec![factor];
        } else if !factor.is_one() {
            self.0.push(factor);
        }
    }
}

impl From<MulBuilder> for Expr {
    fn from(builder: MulBuilder) -> Self {
        Expr::Mul(builder.0).downgrade()
    }
}

/// Builds a sum, dropping terms that are zero.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl SumBuilder {
    fn add(&mut self, term: Expr) {
        if !term.is_zero() {
            self.0.push(term);
        }
    }
}

impl From<SumBuilder> for Expr {
    fn from(builder: SumBuilder) -> Self {
        Expr::Add(builder.0).downgrade()
    }
}

fn ln(arg: Expr) -> Expr {
    Expr::call("ln", vec![arg])
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], var: &str) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(fgh)' = f'gh + fg'h + fgh'`
fn product_rule(factors: &[Expr], var: &str) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();
    for (i, factor) in factors.iter().enumerate() {
        if !factor.contains_symbol(var) {
            continue;
        }

        let mut product = MulBuilder::default();
        for (j, other) in factors.iter().enumerate() {
            if i == j {
                product.mul(derivative(factor, var)?);
            } else {
                product.mul(other.clone());
            }
        }
        sum.add(product.into());
    }
    Ok(sum.into())
}

/// Differentiates `base^exp`.
///
/// - `(f^n)' = n f^(n-1) f'`, if `n` does not depend on the variable
/// - `(a^g)' = a^g ln(a) g'`, if `a` does not depend on the variable
/// - `(f^g)' = f^g (g' ln(f) + g f' / f)`, otherwise
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Result<Expr, Error> {
    let mut product = MulBuilder::default();
    match (base.contains_symbol(var), exp.contains_symbol(var)) {
        (_, false) => {
            product.mul(exp.clone());
            product.mul(Expr::pow(base.clone(), exp.clone() + Expr::num(-1)));
            product.mul(derivative(base, var)?);
        },
        (false, true) => {
            product.mul(Expr::pow(base.clone(), exp.clone()));
            product.mul(ln(base.clone()));
            product.mul(derivative(exp, var)?);
        },
        (true, true) => {
            let mut inner = SumBuilder::default();
            inner.add(derivative(exp, var)? * ln(base.clone()));
            inner.add(exp.clone() * derivative(base, var)? * Expr::pow(base.clone(), Expr::num(-1)));
            product.mul(Expr::pow(base.clone(), exp.clone()));
            product.mul(inner.into());
        },
    }
    Ok(product.into())
}

/// Differentiates a call to a known function, applying the chain rule.
fn call_rule(expr: &Expr, name: &str, args: &[Expr], var: &str) -> Result<Expr, Error> {
    let mut product = MulBuilder::default();
    match (name, args) {
        ("sin", [u]) => {
            product.mul(Expr::call("cos", vec![u.clone()]));
            product.mul(derivative(u, var)?);
        },
        ("cos", [u]) => {
            product.mul(Expr::num(-1));
            product.mul(Expr::call("sin", vec![u.clone()]));
            product.mul(derivative(u, var)?);
        },
        ("tan", [u]) => {
            product.mul(Expr::pow(Expr::call("cos", vec![u.clone()]), Expr::num(-2)));
            product.mul(derivative(u, var)?);
        },
        ("ln", [u]) => {
            product.mul(Expr::pow(u.clone(), Expr::num(-1)));
            product.mul(derivative(u, var)?);
        },
        ("log", [b, u]) if !b.contains_symbol(var) => {
            product.mul(Expr::pow(u.clone() * ln(b.clone()), Expr::num(-1)));
            product.mul(derivative(u, var)?);
        },
        ("sqrt", [u]) => return power_rule(u, &Expr::num(rat((1, 2))), var),
        _ => return Err(Error::NotDifferentiable {
            expr: expr.to_string(),
            var: var.to_string(),
        }),
    }
    Ok(product.into())
}

/// Computes the derivative of the expression with respect to the variable `var`.
///
/// Fails with [`Error::NotDifferentiable`] if the expression contains a function of `var` whose
/// derivative is not known, such as an unevaluated `dd` or `in` call.
pub fn derivative(expr: &Expr, var: &str) -> Result<Expr, Error> {
    if !expr.contains_symbol(var) {
        return Ok(Expr::num(0));
    }

    match expr {
        // only `var` itself reaches this arm
        Expr::Primary(Primary::Number(_) | Primary::Symbol(_)) => Ok(Expr::num(1)),
        Expr::Primary(Primary::Call(name, args)) => call_rule(expr, name, args, var),
        Expr::Add(terms) => sum_rule(terms, var),
        Expr::Mul(factors) => product_rule(factors, var),
        Expr::Exp(base, exp) => power_rule(base, exp, var),
    }
}

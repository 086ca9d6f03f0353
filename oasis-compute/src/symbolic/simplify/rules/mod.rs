//! Implementation of the simplification rules.
//!
//! Each rule is a function that takes the expression to simplify and returns `Some(expr)` with
//! the rewritten expression if the rule applies, or `None` if it does not. Rules that can detect
//! an undefined expression, such as `1/0`, return a [`Result`] instead.

pub mod add;
pub mod call;
pub mod distribute;
pub mod multiply;
pub mod power;

use crate::error::Error;
use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use super::step::Step;

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Add(terms) => f(terms),
        _ => None,
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Mul(factors) => f(factors),
        _ => None,
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent.
///
/// Returns `Ok(Some(expr))` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(
    expr: &Expr,
    f: impl Fn(&Expr, &Expr) -> Result<Option<Expr>, Error>,
) -> Result<Option<Expr>, Error> {
    match expr {
        Expr::Exp(base, exp) => f(base, exp),
        _ => Ok(None),
    }
}

/// Applies the first rule that matches the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    if let Some(expr) = add::all(expr, step_collector) {
        return Ok(Some(expr));
    }
    if let Some(expr) = multiply::all(expr, step_collector) {
        return Ok(Some(expr));
    }
    if let Some(expr) = power::all(expr, step_collector)? {
        return Ok(Some(expr));
    }
    if let Some(expr) = distribute::all(expr, step_collector)? {
        return Ok(Some(expr));
    }
    call::all(expr, step_collector)
}

//! Distribution of multiplication over addition.

use crate::error::Error;
use crate::symbolic::{
    expr::Expr,
    simplify::{rules::power::expansion_exponent, step::Step},
    step_collector::StepCollector,
};

/// The most terms that expanding a product of sums may produce, before like terms are combined.
///
/// Expressions that are already larger than this may still be distributed over, as long as the
/// expansion does not grow them.
pub const MAX_EXPANDED_TERMS: u64 = 1024;

/// Counts the terms the expression would have once every product of sums in it is expanded,
/// including the powers of sums that [`expand_power`](super::power::expand_power) would expand.
pub fn expanded_terms(expr: &Expr) -> u64 {
    match expr {
        Expr::Add(terms) => terms.iter().map(expanded_terms).fold(0, u64::saturating_add),
        Expr::Mul(factors) => factors.iter().map(expanded_terms).fold(1, u64::saturating_mul),
        Expr::Exp(base, exp) => match expansion_exponent(base, exp) {
            Some(n) => expanded_terms(base).saturating_pow(n),
            None => 1,
        },
        Expr::Primary(_) => 1,
    }
}

/// Fails if expanding `expr` would produce `terms` terms and that is both over
/// [`MAX_EXPANDED_TERMS`] and larger than `expr` itself.
pub(crate) fn check_expansion(expr: &Expr, terms: u64) -> Result<(), Error> {
    let size = u64::try_from(expr.complexity()).unwrap_or(u64::MAX);
    if terms > MAX_EXPANDED_TERMS.max(size) {
        Err(Error::ExpressionTooLarge(MAX_EXPANDED_TERMS))
    } else {
        Ok(())
    }
}

/// `a(b+c) = ab+ac`
///
/// Only the first sum in the product is distributed over; later passes handle the rest. The
/// whole expansion is checked against [`MAX_EXPANDED_TERMS`] up front, since each pass only
/// distributes one level.
pub fn distribute_first(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let Expr::Mul(factors) = expr else {
        return Ok(None);
    };
    let Some((idx, terms)) = factors.iter()
        .enumerate()
        .find_map(|(idx, factor)| match factor {
            Expr::Add(terms) => Some((idx, terms)),
            _ => None,
        })
    else {
        return Ok(None);
    };

    check_expansion(expr, expanded_terms(expr))?;

    let new_terms = terms.iter()
        .map(|term| {
            let mut new_factors = factors.clone();
            new_factors[idx] = term.clone();
            Expr::Mul(new_factors)
        })
        .collect();

    step_collector.push(Step::Distribute);
    Ok(Some(Expr::Add(new_terms)))
}

/// Applies all distribution rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    distribute_first(expr, step_collector)
}

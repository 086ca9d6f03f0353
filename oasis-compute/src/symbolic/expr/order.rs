//! Canonical ordering of the terms of a sum and the factors of a product.
//!
//! Sums are ordered like polynomials: by descending degree, with the constant term last, so that
//! `3x-1+x^2` is shown as `x^2+3x-1`. Products put the numeric coefficient first, followed by
//! symbols, function calls, then everything else, so that `x*5` is shown as `5x`.

use crate::primitive::rat;
use rug::Rational;
use std::cmp::Ordering;
use super::{Expr, Primary};

/// Returns the total degree of the expression in all of its symbols. Function calls and
/// non-numeric powers have degree 0.
fn degree(expr: &Expr) -> Rational {
    match expr {
        Expr::Primary(Primary::Symbol(_)) => rat(1),
        Expr::Primary(_) => rat(0),
        Expr::Add(terms) => terms.iter().map(degree).max().unwrap_or_default(),
        Expr::Mul(factors) => factors.iter().map(degree).sum(),
        Expr::Exp(base, exp) => match exp.as_number() {
            Some(n) => degree(base) * n,
            None => rat(0),
        },
    }
}

/// Orders the terms of a sum.
fn cmp_terms(a: &Expr, b: &Expr) -> Ordering {
    let (a_coeff, a_rest) = a.split_coefficient();
    let (b_coeff, b_rest) = b.split_coefficient();

    a.is_number().cmp(&b.is_number())
        .then_with(|| degree(b).cmp(&degree(a)))
        .then_with(|| a_rest.to_string().cmp(&b_rest.to_string()))
        .then_with(|| a_coeff.cmp(&b_coeff))
}

/// Returns the rank of a factor within a product.
fn factor_rank(expr: &Expr) -> u8 {
    if expr.is_number() {
        return 0;
    }

    match expr.as_power().0 {
        Expr::Primary(Primary::Number(_)) => 1,
        Expr::Primary(Primary::Symbol(_)) => 2,
        Expr::Primary(Primary::Call(..)) => 3,
        Expr::Add(_) => 4,
        Expr::Mul(_) | Expr::Exp(..) => 5,
    }
}

/// Orders the factors of a product.
fn cmp_factors(a: &Expr, b: &Expr) -> Ordering {
    let (a_base, a_exp) = a.as_power();
    let (b_base, b_exp) = b.as_power();

    factor_rank(a).cmp(&factor_rank(b))
        .then_with(|| a_base.to_string().cmp(&b_base.to_string()))
        .then_with(|| a_exp.to_string().cmp(&b_exp.to_string()))
}

/// Sorts the list with the given ordering, returning [`None`] if it was already sorted.
fn sort_with(items: &[Expr], cmp: fn(&Expr, &Expr) -> Ordering) -> Option<Vec<Expr>> {
    if items.windows(2).all(|pair| cmp(&pair[0], &pair[1]) != Ordering::Greater) {
        return None;
    }

    let mut sorted = items.to_vec();
    sorted.sort_by(cmp);
    Some(sorted)
}

/// Returns the terms of a sum in canonical order, or [`None`] if they already are.
pub fn sort_terms(terms: &[Expr]) -> Option<Vec<Expr>> {
    sort_with(terms, cmp_terms)
}

/// Returns the factors of a product in canonical order, or [`None`] if they already are.
pub fn sort_factors(factors: &[Expr]) -> Option<Vec<Expr>> {
    sort_with(factors, cmp_factors)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn polynomial_order() {
        let terms = vec![
            Expr::Mul(vec![Expr::num(3), Expr::sym("x")]),
            Expr::num(-1),
            Expr::pow(Expr::sym("x"), Expr::num(2)),
        ];
        assert_eq!(sort_terms(&terms), Some(vec![
            Expr::pow(Expr::sym("x"), Expr::num(2)),
            Expr::Mul(vec![Expr::num(3), Expr::sym("x")]),
            Expr::num(-1),
        ]));
    }

    #[test]
    fn coefficient_first() {
        let factors = vec![Expr::sym("x"), Expr::num(5)];
        assert_eq!(sort_factors(&factors), Some(vec![Expr::num(5), Expr::sym("x")]));
        assert_eq!(sort_factors(&[Expr::num(5), Expr::sym("x")]), None);
    }
}

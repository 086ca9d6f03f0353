//! Simplification rules for sums, including combining like terms.

use crate::primitive::rat;
use crate::symbolic::{
    expr::{sort_terms, Expr},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .flat_map(|term| match term {
                Expr::Add(inner) => inner.clone(),
                term => vec![term.clone()],
            })
            .collect();
        Some(Expr::Add(new_terms))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `2+a+3 = a+5`
pub fn fold_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if terms.iter().filter(|term| term.is_number()).count() < 2 {
            return None;
        }

        let mut sum = rat(0);
        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term.as_number() {
                Some(n) => sum += n,
                None => new_terms.push(term.clone()),
            }
        }
        new_terms.push(Expr::num(sum));
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Builds the term `coeff*rest`, dropping the coefficient if it is one.
fn make_term(coeff: Rational, rest: Expr) -> Expr {
    if rest.is_one() {
        Expr::num(coeff)
    } else if coeff == 1 {
        rest
    } else {
        Expr::num(coeff) * rest
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `ab-ba = 0`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let mut groups: Vec<(Rational, Expr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => *sum += coeff,
                None => groups.push((coeff, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coeff, _)| coeff.cmp0().is_ne())
            .map(|(coeff, rest)| make_term(coeff, rest))
            .collect();
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// A sum with a single term is that term; an empty sum is zero.
pub fn collapse(expr: &Expr, _: &mut dyn StepCollector<Step>) -> Option<Expr> {
    do_add(expr, |terms| (terms.len() <= 1).then(|| Expr::Add(terms.to_vec()).downgrade()))
}

/// Puts the terms in canonical order.
pub fn reorder(expr: &Expr, _: &mut dyn StepCollector<Step>) -> Option<Expr> {
    do_add(expr, |terms| sort_terms(terms).map(Expr::Add))
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
        .or_else(|| collapse(expr, step_collector))
        .or_else(|| reorder(expr, step_collector))
}

//! Simplification rules for products, including combining like factors.

use crate::primitive::{is_integer, rat};
use crate::symbolic::{
    expr::{sort_factors, Expr},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .flat_map(|factor| match factor {
                Expr::Mul(inner) => inner.clone(),
                factor => vec![factor.clone()],
            })
            .collect();
        Some(Expr::Mul(new_factors))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter().any(Expr::is_zero).then(|| Expr::num(0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `2*a*3 = 6*a`
pub fn fold_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut product = rat(1);
        let mut new_factors = vec![Expr::num(0)];
        for factor in factors {
            match factor.as_number() {
                Some(n) => product *= n,
                None => new_factors.push(factor.clone()),
            }
        }
        new_factors[0] = Expr::num(product);
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// `1*a = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Returns true if the factor is a sum raised to a positive integer power. Such factors are
/// expanded instead of combined.
fn is_expandable(factor: &Expr) -> bool {
    let (base, exp) = factor.as_power();
    matches!(base, Expr::Add(_))
        && exp.as_number().is_some_and(|n| is_integer(n) && n.cmp0().is_gt())
}

/// Returns true if the exponents of a group of like factors can be added together.
///
/// Numeric powers of numbers are only combined if the combined exponent is an integer, so that
/// `2*2^(1/2)` is left alone instead of becoming `2^(3/2)`.
fn can_combine(base: &Expr, exps: &[Expr]) -> bool {
    if !base.is_number() {
        return true;
    }

    let mut sum = rat(0);
    for exp in exps {
        match exp.as_number() {
            Some(n) => sum += n,
            None => return true,
        }
    }
    is_integer(&sum)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^(2+3)`
/// `a*a^-1 = a^(1+(-1))`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut groups: Vec<(&Expr, Vec<Expr>)> = Vec::with_capacity(factors.len());
        let mut kept = Vec::new();
        for factor in factors {
            // plain numbers are folded by another rule
            if factor.is_number() || is_expandable(factor) {
                kept.push(factor.clone());
                continue;
            }

            let (base, exp) = factor.as_power();
            match groups.iter_mut().find(|(other, _)| **other == *base) {
                Some((_, exps)) => exps.push(exp),
                None => groups.push((base, vec![exp])),
            }
        }

        let mut combined_any = false;
        for (base, exps) in groups {
            if exps.len() > 1 && can_combine(base, &exps) {
                combined_any = true;
                kept.push(Expr::pow(base.clone(), Expr::Add(exps)));
            } else {
                kept.extend(exps.into_iter().map(|exp| {
                    if exp.is_one() {
                        base.clone()
                    } else {
                        Expr::pow(base.clone(), exp)
                    }
                }));
            }
        }

        combined_any.then(|| Expr::Mul(kept))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// A product with a single factor is that factor; an empty product is one.
pub fn collapse(expr: &Expr, _: &mut dyn StepCollector<Step>) -> Option<Expr> {
    do_multiply(expr, |factors| (factors.len() <= 1).then(|| Expr::Mul(factors.to_vec()).downgrade()))
}

/// Puts the factors in canonical order.
pub fn reorder(expr: &Expr, _: &mut dyn StepCollector<Step>) -> Option<Expr> {
    do_multiply(expr, |factors| sort_factors(factors).map(Expr::Mul))
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| collapse(expr, step_collector))
        .or_else(|| reorder(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_factors_add_exponents() {
        let expr = Expr::Mul(vec![
            Expr::sym("x"),
            Expr::sym("y"),
            Expr::pow(Expr::sym("x"), Expr::num(2)),
        ]);
        assert_eq!(
            combine_like_factors(&expr, &mut ()),
            Some(Expr::Mul(vec![
                Expr::pow(Expr::sym("x"), Expr::Add(vec![Expr::num(1), Expr::num(2)])),
                Expr::sym("y"),
            ])),
        );
    }

    #[test]
    fn numeric_roots_stay_split() {
        let half = Expr::num((1, 2));
        let expr = Expr::Mul(vec![Expr::num(2), Expr::pow(Expr::num(2), half.clone())]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);

        let expr = Expr::Mul(vec![
            Expr::pow(Expr::num(2), half.clone()),
            Expr::pow(Expr::num(2), half),
        ]);
        assert!(combine_like_factors(&expr, &mut ()).is_some());
    }

    #[test]
    fn zero_and_one() {
        let expr = Expr::Mul(vec![Expr::sym("x"), Expr::num(0)]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(Expr::num(0)));

        let expr = Expr::Mul(vec![Expr::num(1), Expr::sym("x")]);
        assert_eq!(multiply_one(&expr, &mut ()), Some(Expr::sym("x")));
    }
}

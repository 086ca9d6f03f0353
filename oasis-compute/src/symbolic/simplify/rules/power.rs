//! Simplification rules for powers.

use crate::error::Error;
use crate::primitive::{is_integer, pow, rat, root};
use crate::symbolic::{
    expr::Expr,
    simplify::{
        rules::{distribute::{check_expansion, expanded_terms}, do_power},
        step::Step,
    },
    step_collector::StepCollector,
};
use rug::{Integer, Rational};

/// A power rule that can fail.
type Rule = fn(&Expr, &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error>;

/// The largest power of a sum that is expanded into a product.
pub const MAX_EXPANDED_POWER: u32 = 8;

/// If the expression is an integer, returns it.
fn as_integer(expr: &Expr) -> Option<&Integer> {
    expr.as_number().filter(|n| is_integer(n)).map(Rational::numer)
}

/// `a^0 = 1`
///
/// `0^0` is undefined.
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        if !exp.is_zero() {
            Ok(None)
        } else if base.is_zero() {
            Err(Error::ZeroToZero)
        } else {
            Ok(Some(Expr::num(1)))
        }
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::PowerZero);
        expr
    }))
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| Ok(exp.is_one().then(|| base.clone())))?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::PowerOne);
        expr
    }))
}

/// `0^n = 0` for positive `n`
///
/// Negative powers of zero are a division by zero.
pub fn zero_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        if !base.is_zero() {
            return Ok(None);
        }

        match exp.as_number() {
            Some(n) if n.cmp0().is_lt() => Err(Error::DivisionByZero),
            Some(_) => Ok(Some(Expr::num(0))),
            None => Ok(None),
        }
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::ZeroBase);
        expr
    }))
}

/// `1^n = 1`
pub fn one_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, _| Ok(base.is_one().then(|| Expr::num(1))))?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::OneBase);
        expr
    }))
}

/// Evaluates numeric powers exactly.
///
/// `2^3 = 8`
/// `2^-1 = 1/2`
/// `(4/9)^(1/2) = 2/3`
/// `8^(2/3) = 4`
///
/// Powers whose root is irrational, such as `2^(1/2)`, are left alone. Even roots of negative
/// numbers are undefined.
pub fn evaluate_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        let (Some(base), Some(exp)) = (base.as_number(), exp.as_number()) else {
            return Ok(None);
        };

        if is_integer(exp) {
            return Ok(Some(Expr::num(pow(base, exp.numer())?)));
        }

        let Some(degree) = exp.denom().to_u32() else {
            return Ok(None);
        };
        if base.cmp0().is_lt() && degree % 2 == 0 {
            return Err(Error::Domain {
                function: if degree == 2 { "sqrt" } else { "^" },
                reason: "even roots of negative numbers are not real",
            });
        }

        match root(base, degree) {
            Some(root) => Ok(Some(Expr::num(pow(&root, exp.numer())?))),
            None => Ok(None),
        }
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::EvaluatePower);
        expr
    }))
}

/// Splits the integer part out of a fractional power of a positive number.
///
/// `2^(3/2) = 2^1*2^(1/2)`
/// `2^(-1/2) = 2^-1*2^(1/2)`
pub fn split_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        let (Some(n), Some(e)) = (base.as_number(), exp.as_number()) else {
            return Ok(None);
        };
        if n.cmp0().is_le() {
            return Ok(None);
        }

        let whole = e.clone().floor();
        let fract = Rational::from(e - &whole);
        if whole.cmp0().is_eq() || fract.cmp0().is_eq() {
            return Ok(None);
        }

        Ok(Some(Expr::Mul(vec![
            Expr::pow(base.clone(), Expr::num(whole)),
            Expr::pow(base.clone(), Expr::num(fract)),
        ])))
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::SplitPower);
        expr
    }))
}

/// `(a^b)^n = a^(bn)` for integer `n`
pub fn power_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        let (Expr::Exp(inner_base, inner_exp), Some(_)) = (base, as_integer(exp)) else {
            return Ok(None);
        };
        Ok(Some(Expr::pow(
            (**inner_base).clone(),
            (**inner_exp).clone() * exp.clone(),
        )))
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::PowerOfPower);
        expr
    }))
}

/// `(ab)^n = a^n*b^n` for integer `n`
pub fn power_of_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        let (Expr::Mul(factors), Some(_)) = (base, as_integer(exp)) else {
            return Ok(None);
        };
        Ok(Some(Expr::Mul(
            factors.iter()
                .map(|factor| Expr::pow(factor.clone(), exp.clone()))
                .collect(),
        )))
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::PowerOfProduct);
        expr
    }))
}

/// If `base^exp` is a power of a sum that [`expand_power`] expands, returns the exponent.
pub(crate) fn expansion_exponent(base: &Expr, exp: &Expr) -> Option<u32> {
    let Expr::Add(_) = base else {
        return None;
    };
    as_integer(exp)
        .and_then(Integer::to_u32)
        .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n))
}

/// `(a+b)^n = (a+b)(a+b)...` for `2 <= n <=` [`MAX_EXPANDED_POWER`]
///
/// Fails if the fully expanded power would have more than
/// [`MAX_EXPANDED_TERMS`](super::distribute::MAX_EXPANDED_TERMS) terms.
pub fn expand_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let opt = do_power(expr, |base, exp| {
        let Some(n) = expansion_exponent(base, exp) else {
            return Ok(None);
        };
        check_expansion(expr, expanded_terms(base).saturating_pow(n))?;

        Ok(Some(Expr::Mul(vec![base.clone(); n as usize])))
    })?;

    Ok(opt.map(|expr| {
        step_collector.push(Step::ExpandPower);
        expr
    }))
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let rules: [Rule; 9] = [
        power_zero,
        power_one,
        zero_base,
        one_base,
        evaluate_power,
        split_power,
        power_of_power,
        power_of_product,
        expand_power,
    ];

    for rule in rules {
        if let Some(expr) = rule(expr, step_collector)? {
            return Ok(Some(expr));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify::rules::distribute::MAX_EXPANDED_TERMS;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn zero_to_zero() {
        let expr = Expr::pow(Expr::num(0), Expr::num(0));
        assert_eq!(power_zero(&expr, &mut ()), Err(Error::ZeroToZero));
    }

    #[test]
    fn reciprocal_of_zero() {
        let expr = Expr::pow(Expr::num(0), Expr::num(-2));
        assert_eq!(zero_base(&expr, &mut ()), Err(Error::DivisionByZero));
    }

    #[test]
    fn rational_powers() {
        let expr = Expr::pow(Expr::num(-8), Expr::num((1, 3)));
        assert_eq!(evaluate_power(&expr, &mut ()), Ok(Some(Expr::num(-2))));

        let expr = Expr::pow(Expr::num(2), Expr::num((1, 2)));
        assert_eq!(evaluate_power(&expr, &mut ()), Ok(None));

        let expr = Expr::pow(Expr::num(-4), Expr::num((1, 2)));
        assert!(matches!(evaluate_power(&expr, &mut ()), Err(Error::Domain { function: "sqrt", .. })));
    }

    #[test]
    fn split_fractional_power() {
        let expr = Expr::pow(Expr::num(2), Expr::num((-1, 2)));
        assert_eq!(split_power(&expr, &mut ()), Ok(Some(Expr::Mul(vec![
            Expr::pow(Expr::num(2), Expr::num(-1)),
            Expr::pow(Expr::num(2), Expr::num((1, 2))),
        ]))));
    }

    #[test]
    fn expansion_limit() {
        let sum = Expr::Add(vec![Expr::sym("x"), Expr::num(1)]);
        let expr = Expr::pow(sum.clone(), Expr::num(3));
        assert_eq!(expand_power(&expr, &mut ()), Ok(Some(Expr::Mul(vec![sum.clone(); 3]))));

        let expr = Expr::pow(sum, Expr::num(9));
        assert_eq!(expand_power(&expr, &mut ()), Ok(None));
    }

    #[test]
    fn wide_sum_power_is_too_large() {
        let sum = Expr::Add(["a", "b", "c", "d", "e", "f", "g", "h"].into_iter().map(Expr::sym).collect());
        let expr = Expr::pow(sum.clone(), Expr::num(8));
        assert_eq!(expand_power(&expr, &mut ()), Err(Error::ExpressionTooLarge(MAX_EXPANDED_TERMS)));

        // 8^3 = 512 terms is within the limit
        let expr = Expr::pow(sum.clone(), Expr::num(3));
        assert_eq!(expand_power(&expr, &mut ()), Ok(Some(Expr::Mul(vec![sum; 3]))));
    }

    #[test]
    fn steps_only_on_success() {
        let mut steps = Vec::new();
        let expr = Expr::pow(Expr::sym("x"), Expr::num(2));
        assert_eq!(all(&expr, &mut steps), Ok(None));
        assert!(steps.is_empty());
    }
}

//! Evaluation of function calls.
//!
//! Every call is checked against the function registry in [`crate::funcs`], so calling an unknown
//! function or passing the wrong number of arguments is an error. Calls that have no simpler form,
//! such as `sin(x)`, are left alone.

use crate::error::Error;
use crate::funcs;
use crate::primitive::{pow, rat};
use crate::symbolic::{
    derivative::derivative,
    expr::{Expr, Primary},
    integral::integral,
    simplify::step::Step,
    step_collector::StepCollector,
};
use rug::Rational;

/// The largest exponent tried when looking for an exact logarithm.
const MAX_LOG_EXPONENT: u32 = 64;

/// Returns the variable argument of `dd` or `in`.
fn variable<'a>(function: &'static str, arg: &'a Expr) -> Result<&'a str, Error> {
    arg.as_symbol().ok_or_else(|| Error::ExpectedVariable {
        function,
        found: arg.to_string(),
    })
}

/// Finds the integer `k` such that `base^k = arg`, if there is one.
fn integer_log(base: &Rational, arg: &Rational) -> Option<i64> {
    let reciprocal = arg.clone().recip();
    for k in 1..=MAX_LOG_EXPONENT {
        let power = pow(base, &k.into()).ok()?;
        if power == *arg {
            return Some(i64::from(k));
        } else if power == reciprocal {
            return Some(-i64::from(k));
        }
    }
    None
}

/// `log(b, a)`
///
/// `log(2, 8) = 3`
/// `log(4, 2) = 1/2`
/// `log(b, 1) = 0`
/// `log(b, b) = 1`
/// `log(b, b^n) = n`
fn log(base: &Expr, arg: &Expr) -> Result<Option<Expr>, Error> {
    if let (Some(b), Some(a)) = (base.as_number(), arg.as_number()) {
        if b.cmp0().is_le() || *b == 1 {
            return Err(Error::Domain {
                function: "log",
                reason: "the base must be positive and not equal to 1",
            });
        }
        if a.cmp0().is_le() {
            return Err(Error::Domain {
                function: "log",
                reason: "the argument must be positive",
            });
        }
    }

    if arg.is_one() {
        return Ok(Some(Expr::num(0)));
    }
    if base == arg {
        return Ok(Some(Expr::num(1)));
    }
    if let Expr::Exp(arg_base, arg_exp) = arg {
        if **arg_base == *base {
            return Ok(Some((**arg_exp).clone()));
        }
    }

    let (Some(b), Some(a)) = (base.as_number(), arg.as_number()) else {
        return Ok(None);
    };
    if let Some(k) = integer_log(b, a) {
        return Ok(Some(Expr::num(k)));
    }
    if let Some(k) = integer_log(a, b) {
        return Ok(Some(Expr::num(rat((1, k)))));
    }
    Ok(None)
}

/// `ln(1) = 0`
fn ln(arg: &Expr) -> Result<Option<Expr>, Error> {
    match arg.as_number() {
        Some(n) if n.cmp0().is_le() => Err(Error::Domain {
            function: "ln",
            reason: "the argument must be positive",
        }),
        Some(n) if *n == 1 => Ok(Some(Expr::num(0))),
        _ => Ok(None),
    }
}

/// Evaluates a call to one of the known functions.
pub fn evaluate(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    let Expr::Primary(Primary::Call(name, args)) = expr else {
        return Ok(None);
    };

    let func = funcs::get(name)?;
    func.check_arity(args.len())?;

    let (result, step) = match (func.name, args.as_slice()) {
        ("dd", [f, x]) => (Some(derivative(f, variable("dd", x)?)?), Step::Derivative),
        ("in", [f, x]) => (Some(integral(f, variable("in", x)?)?), Step::Integral),
        ("log", [base, arg]) => (log(base, arg)?, Step::Logarithm),
        ("ln", [arg]) => (ln(arg)?, Step::Logarithm),
        ("sqrt", [arg]) => (Some(Expr::pow(arg.clone(), Expr::num((1, 2)))), Step::SquareRoot),
        ("sin" | "tan", [arg]) => (arg.is_zero().then(|| Expr::num(0)), Step::Trigonometry),
        ("cos", [arg]) => (arg.is_zero().then(|| Expr::num(1)), Step::Trigonometry),
        _ => (None, Step::Trigonometry),
    };

    Ok(result.map(|expr| {
        step_collector.push(step);
        expr
    }))
}

/// Applies all function call rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error> {
    evaluate(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(name: &str, args: Vec<Expr>) -> Result<Option<Expr>, Error> {
        evaluate(&Expr::call(name, args), &mut ())
    }

    #[test]
    fn exact_logarithms() {
        assert_eq!(call("log", vec![Expr::num(2), Expr::num(8)]), Ok(Some(Expr::num(3))));
        assert_eq!(call("log", vec![Expr::num(2), Expr::num((1, 8))]), Ok(Some(Expr::num(-3))));
        assert_eq!(call("log", vec![Expr::num(8), Expr::num(2)]), Ok(Some(Expr::num((1, 3)))));
        assert_eq!(call("log", vec![Expr::num(2), Expr::num(3)]), Ok(None));
    }

    #[test]
    fn symbolic_logarithms() {
        let x = Expr::sym("x");
        assert_eq!(call("log", vec![x.clone(), x.clone()]), Ok(Some(Expr::num(1))));
        assert_eq!(
            call("log", vec![x.clone(), Expr::pow(x.clone(), Expr::sym("n"))]),
            Ok(Some(Expr::sym("n"))),
        );
        assert_eq!(call("log", vec![x, Expr::sym("y")]), Ok(None));
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(call("ln", vec![Expr::num(0)]), Err(Error::Domain { function: "ln", .. })));
        assert!(matches!(
            call("log", vec![Expr::num(-2), Expr::num(4)]),
            Err(Error::Domain { function: "log", .. }),
        ));
    }

    #[test]
    fn registry_errors() {
        assert_eq!(
            call("sinn", vec![Expr::sym("x")]),
            Err(Error::UnknownFunction { name: "sinn".to_string(), suggestion: Some("sin") }),
        );
        assert_eq!(
            call("ln", vec![Expr::num(1), Expr::num(2)]),
            Err(Error::WrongArity { name: "ln", expected: 1, found: 2 }),
        );
    }

    #[test]
    fn trigonometry_at_zero() {
        assert_eq!(call("cos", vec![Expr::num(0)]), Ok(Some(Expr::num(1))));
        assert_eq!(call("sin", vec![Expr::sym("x")]), Ok(None));
    }
}

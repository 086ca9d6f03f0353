//! Simplification of expressions.
//!
//! Simplification runs in passes. A pass visits the expression tree bottom-up: the children of a
//! node are simplified first, then [`rules::all`] is applied to the node until no rule matches.
//! Passes repeat until one leaves the expression unchanged, which is the fixpoint returned to the
//! caller. If no fixpoint is reached within the configured number of passes, simplification fails
//! with [`Error::NoFixpoint`].
//!
//! The arguments of `dd` and `in` are simplified to their own fixpoint before the call itself is
//! evaluated, since differentiation and integration only recognize simplified forms.

pub mod rules;
pub mod step;

use crate::error::Error;
use crate::symbolic::{expr::{Expr, Primary}, step_collector::StepCollector};
use step::Step;

/// The default number of passes [`simplify`] runs before giving up.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// Functions whose arguments are fully simplified before the function is evaluated.
const SIMPLIFY_ARGS_FIRST: &[&str] = &["dd", "in"];

/// Simplifies the list of expressions with one pass each. Returns the new list, and whether any of
/// the expressions changed.
fn pass_all(
    exprs: &[Expr],
    max_passes: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<(Vec<Expr>, bool), Error> {
    let mut changed = false;
    let mut new_exprs = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let (expr, expr_changed) = pass(expr, max_passes, step_collector)?;
        changed |= expr_changed;
        new_exprs.push(expr);
    }
    Ok((new_exprs, changed))
}

/// Runs one simplification pass over the expression. Returns the new expression, and whether any
/// rule was applied.
fn pass(
    expr: &Expr,
    max_passes: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<(Expr, bool), Error> {
    let (mut current, mut changed) = match expr {
        Expr::Primary(Primary::Call(name, args)) if SIMPLIFY_ARGS_FIRST.contains(&name.as_str()) => {
            let new_args = args.iter()
                .map(|arg| simplify_with(arg, max_passes, step_collector))
                .collect::<Result<Vec<_>, _>>()?;
            let changed = new_args != *args;
            (Expr::call(name.clone(), new_args), changed)
        },
        Expr::Primary(Primary::Call(name, args)) => {
            let (args, changed) = pass_all(args, max_passes, step_collector)?;
            (Expr::call(name.clone(), args), changed)
        },
        Expr::Primary(_) => (expr.clone(), false),
        Expr::Add(terms) => {
            let (terms, changed) = pass_all(terms, max_passes, step_collector)?;
            (Expr::Add(terms), changed)
        },
        Expr::Mul(factors) => {
            let (factors, changed) = pass_all(factors, max_passes, step_collector)?;
            (Expr::Mul(factors), changed)
        },
        Expr::Exp(base, exp) => {
            let (base, base_changed) = pass(base, max_passes, step_collector)?;
            let (exp, exp_changed) = pass(exp, max_passes, step_collector)?;
            (Expr::pow(base, exp), base_changed || exp_changed)
        },
    };

    let mut rewrites = 0;
    while let Some(next) = rules::all(&current, step_collector)? {
        rewrites += 1;
        if rewrites > max_passes {
            return Err(Error::NoFixpoint(max_passes));
        }
        current = next;
        changed = true;
    }

    Ok((current, changed))
}

/// Simplifies the expression, running at most [`DEFAULT_MAX_PASSES`] passes.
pub fn simplify(expr: &Expr) -> Result<Expr, Error> {
    simplify_with(expr, DEFAULT_MAX_PASSES, &mut ())
}

/// Simplifies the expression and returns the steps taken, in the order they were applied.
pub fn simplify_with_steps(expr: &Expr) -> Result<(Expr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, DEFAULT_MAX_PASSES, &mut steps)?;
    Ok((simplified, steps))
}

/// Simplifies the expression, running at most `max_passes` passes. Every rule that is applied is
/// reported to the given [`StepCollector`].
pub fn simplify_with(
    expr: &Expr,
    max_passes: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    let mut current = expr.clone();
    for _ in 0..max_passes {
        let (next, changed) = pass(&current, max_passes, step_collector)?;
        if !changed {
            return Ok(next);
        }
        current = next;
    }

    Err(Error::NoFixpoint(max_passes))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::step_collector::StepCount;
    use oasis_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let mut parser = Parser::new(input);
        parser.try_parse_full::<AstExpr>().unwrap().into()
    }

    /// Simplifies the input and renders it as text.
    fn simplified(input: &str) -> String {
        simplify(&parse(input)).unwrap().to_string()
    }

    fn simplify_err(input: &str) -> Error {
        simplify(&parse(input)).unwrap_err()
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("2*x+3*x"), "5x");
        assert_eq!(simplified("x+x+x"), "3x");
        assert_eq!(simplified("x-x"), "0");
        assert_eq!(simplified("3*x-1+x^2"), "x^2+3x-1");
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplified("x*x"), "x^2");
        assert_eq!(simplified("x^2*x^3"), "x^5");
        assert_eq!(simplified("x/x"), "1");
        assert_eq!(simplified("2*x*3"), "6x");
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(simplified("1/2+1/3"), "5/6");
        assert_eq!(simplified("0.1+0.2"), "3/10");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("(4/9)^(1/2)"), "2/3");
        assert_eq!(simplified("8^(2/3)"), "4");
    }

    #[test]
    fn expand_and_distribute() {
        assert_eq!(simplified("2*(x+1)"), "2x+2");
        assert_eq!(simplified("(x+1)^2"), "x^2+2x+1");
        assert_eq!(simplified("(x+1)*(x-1)"), "x^2-1");
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(16)"), "4");
        assert_eq!(simplified("sqrt(x)"), "sqrt(x)");
        assert_eq!(simplified("sqrt(2)*sqrt(2)"), "2");
        assert_eq!(simplified("2^(3/2)"), "2sqrt(2)");
    }

    #[test]
    fn calculus() {
        assert_eq!(simplified("dd(x^2,x)"), "2x");
        assert_eq!(simplified("dd(x^3+2*x,x)"), "3x^2+2");
        assert_eq!(simplified("in(2*x,x)"), "x^2");
        assert_eq!(simplified("in(x*(x+1),x)"), "x^3/3+x^2/2");
        assert_eq!(simplified("dd(in(x^2,x),x)"), "x^2");
    }

    #[test]
    fn logarithms() {
        assert_eq!(simplified("log(2,8)"), "3");
        assert_eq!(simplified("log(4,2)"), "1/2");
        assert_eq!(simplified("log(10,1/100)"), "-2");
        assert_eq!(simplified("log(x,x)"), "1");
        assert_eq!(simplified("ln(1)"), "0");
    }

    #[test]
    fn already_simple() {
        for input in ["x", "5", "x^2+1", "sin(x)", "2^x"] {
            assert_eq!(simplified(input), input);
        }
    }

    #[test]
    fn errors() {
        assert_eq!(simplify_err("1/0"), Error::DivisionByZero);
        assert_eq!(simplify_err("0^0"), Error::ZeroToZero);
        assert_eq!(simplify_err("x/(x-x)"), Error::DivisionByZero);
        assert!(matches!(simplify_err("foo(x)"), Error::UnknownFunction { .. }));
        assert!(matches!(simplify_err("dd(x)"), Error::WrongArity { name: "dd", expected: 2, found: 1 }));
        assert!(matches!(simplify_err("dd(x^2,2)"), Error::ExpectedVariable { function: "dd", .. }));
        assert!(matches!(simplify_err("sqrt(-4)"), Error::Domain { function: "sqrt", .. }));
        assert!(matches!(simplify_err("log(1,5)"), Error::Domain { function: "log", .. }));
        assert!(matches!(simplify_err("in(sin(x^2),x)"), Error::NotIntegrable { .. }));
    }

    #[test]
    fn pass_limit() {
        assert_eq!(
            simplify_with(&parse("(x+1)^8"), 1, &mut ()),
            Err(Error::NoFixpoint(1)),
        );
    }

    #[test]
    fn expansion_size_limit() {
        let too_large = Error::ExpressionTooLarge(rules::distribute::MAX_EXPANDED_TERMS);
        assert_eq!(simplify_err("(a+b+c+d+e+f+g+h)^8"), too_large);

        let product = (1..=20)
            .map(|n| format!("(x+{})", n))
            .collect::<Vec<_>>()
            .join("*");
        assert_eq!(simplify_err(&product), too_large);

        assert!(simplify(&parse("(a+b)^8")).is_ok());
        assert!(simplify(&parse("(a+b+c)*(d+e+f)*(g+h)")).is_ok());
    }

    #[test]
    fn steps_are_reported() {
        let (expr, steps) = simplify_with_steps(&parse("x+x")).unwrap();
        assert_eq!(expr.to_string(), "2x");
        assert_eq!(steps, vec![Step::CombineLikeTerms]);

        let mut count = StepCount::default();
        simplify_with(&parse("2+3"), DEFAULT_MAX_PASSES, &mut count).unwrap();
        assert_eq!(count, StepCount(1));
    }
}

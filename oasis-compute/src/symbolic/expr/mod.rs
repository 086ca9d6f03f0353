//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](oasis_parser::parser::ast::Expr) type from `oasis_parser` mirrors the syntax of
//! the input: every binary operator is its own node, and subtraction, division and negation are
//! all distinct operations. That is convenient for reporting errors, but not for algebra.
//!
//! This module defines a separate [`Expr`] that flattens the tree into sums of products:
//!
//! - `a-b` becomes `a+(-1)*b`;
//! - `a/b` becomes `a*b^-1`;
//! - `-a` becomes `(-1)*a`, or the negated number if `a` is a number;
//! - nested sums and products are spliced into their parent, so `x+(y+z)` is a single
//!   [`Expr::Add`] with three terms.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is as hard as simplifying them. The
//! [`PartialEq`] implementation for [`Expr`] instead implements **strict equality**: two
//! expressions are strictly equal if they have the same shape, where the terms of a sum and the
//! factors of a product may appear in any order. `x+2` and `2+x` are strictly equal; `2x+2` and
//! `2(x+1)` are not.
//!
//! Strict equality never reports false positives, so the simplifier can use it to find like terms
//! and like factors without simplifying first.

mod iter;
mod order;

use crate::primitive::rat;
use iter::Subexprs;
use oasis_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::Rational;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};

pub use order::{sort_factors, sort_terms};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An exact rational number, such as `2`, `-3` or `1/4`.
    Number(Rational),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `dd(x^2, x)`.
    Call(String, Vec<Expr>),
}

/// A mathematical expression, flattened into sums of products.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a number expression.
    pub fn num<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rat(n)))
    }

    /// Creates a symbol expression.
    pub fn sym(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the power `base^exp`.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates the fraction `numerator/denominator`, represented as
    /// `numerator*denominator^-1`.
    pub fn fraction(numerator: Expr, denominator: Expr) -> Self {
        numerator * Self::pow(denominator, Self::num(-1))
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| n.cmp0().is_eq())
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a function call, returns its name and arguments.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Splits the expression into its base and exponent. If the expression is not [`Expr::Exp`],
    /// the exponent is `1`.
    pub fn as_power(&self) -> (&Expr, Expr) {
        match self {
            Self::Exp(base, exp) => (&**base, (**exp).clone()),
            expr => (expr, Self::num(1)),
        }
    }

    /// Splits the expression into its numeric coefficient and the remaining factors. If the
    /// expression has no numeric factor, the coefficient is `1`.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a` -> `(3, a)`
    /// - `-2*a*b` -> `(-2, a*b)`
    /// - `a` -> `(1, a)`
    pub fn split_coefficient(&self) -> (Rational, Expr) {
        match self {
            Self::Primary(Primary::Number(n)) => (n.clone(), Self::num(1)),
            Self::Mul(factors) => {
                let mut coeff = rat(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.as_number() {
                        Some(n) => coeff *= n,
                        None => rest.push(factor.clone()),
                    }
                }
                (coeff, Self::Mul(rest).downgrade())
            },
            expr => (rat(1), expr.clone()),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::num(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::num(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Walks this expression and everything nested in it.
    pub fn subexprs(&self) -> Subexprs {
        Subexprs::new(self)
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.subexprs().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns the number of nodes in the expression tree.
    pub fn complexity(&self) -> usize {
        self.subexprs().count()
    }
}

/// Returns true if the two lists contain strictly equal expressions, in any order.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, other)| !used[i] && item == other);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// Two expressions are strictly equal if:
/// - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
/// - If both are [`Expr::Primary`], both expressions must have strictly equal values.
/// - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
/// factors, in any order.
/// - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => same_multiset(lhs, rhs),
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two expressions, flattening sums: adding to an [`Expr::Add`] appends to its terms.
impl Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Expr::Add(Vec::new()));
        let mut terms = match lhs {
            Expr::Add(terms) => terms,
            lhs => vec![lhs],
        };
        match rhs {
            Expr::Add(rhs_terms) => terms.extend(rhs_terms),
            rhs => terms.push(rhs),
        }
        *self = Expr::Add(terms);
    }
}

/// Multiplies two expressions, flattening products: multiplying an [`Expr::Mul`] appends to its
/// factors.
impl Mul for Expr {
    type Output = Expr;

    fn mul(mut self, rhs: Self) -> Self::Output {
        self *= rhs;
        self
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Expr::Mul(Vec::new()));
        let mut factors = match lhs {
            Expr::Mul(factors) => factors,
            lhs => vec![lhs],
        };
        match rhs {
            Expr::Mul(rhs_factors) => factors.extend(rhs_factors),
            rhs => factors.push(rhs),
        }
        *self = Expr::Mul(factors);
    }
}

/// Negates the expression: numbers are negated directly, anything else becomes `-1*expr`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        match self {
            Expr::Primary(Primary::Number(n)) => Expr::Primary(Primary::Number(-n)),
            expr => Expr::num(-1) * expr,
        }
    }
}

impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => Self::Primary(Primary::Number(num.value)),
            AstExpr::Literal(Literal::Symbol(sym)) => Self::Primary(Primary::Symbol(sym.name)),
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => Self::fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use oasis_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn convert(input: &str) -> Expr {
        let mut parser = Parser::new(input);
        parser.try_parse_full::<AstExpr>().unwrap().into()
    }

    #[test]
    fn flatten_sum() {
        assert_eq!(convert("x+(y+z)"), Expr::Add(vec![
            Expr::sym("x"),
            Expr::sym("y"),
            Expr::sym("z"),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(convert("x-y/2"), Expr::Add(vec![
            Expr::sym("x"),
            Expr::Mul(vec![
                Expr::num(-1),
                Expr::sym("y"),
                Expr::pow(Expr::num(2), Expr::num(-1)),
            ]),
        ]));
    }

    #[test]
    fn negated_number() {
        assert_eq!(convert("-3"), Expr::num(-3));
        assert_eq!(convert("-x^2"), Expr::Mul(vec![
            Expr::num(-1),
            Expr::pow(Expr::sym("x"), Expr::num(2)),
        ]));
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(convert("x+2*y"), convert("y*2+x"));
        assert_ne!(convert("x+x+y"), convert("x+y+y"));
        assert_ne!(convert("2*x+2"), convert("2*(x+1)"));
    }

    #[test]
    fn coefficients() {
        let (coeff, rest) = convert("-2*a*b").split_coefficient();
        assert_eq!(coeff, rat(-2));
        assert_eq!(rest, Expr::Mul(vec![Expr::sym("a"), Expr::sym("b")]));

        let (coeff, rest) = convert("x").split_coefficient();
        assert_eq!(coeff, rat(1));
        assert_eq!(rest, Expr::sym("x"));
    }

    #[test]
    fn contains_symbol_in_call() {
        let expr = convert("2*sin(x^2)");
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("y"));
        assert_eq!(expr.complexity(), 6);
    }
}

//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are trees of [`Expr`] nodes. They are built from the
//! [`oasis_parser::parser::ast::Expr`] produced by the parser, but **flatten** the tree: `x+(y+z)`
//! is a single [`Expr::Add`] node with three children, and `a-b` is stored as `a+(-1)*b`. Spans
//! are dropped during the conversion.
//!
//! ```
//! use oasis_compute::symbolic::Expr;
//! use oasis_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let mut parser = Parser::new("x+(y+z)");
//! let ast_expr = parser.try_parse_full::<AstExpr>().unwrap();
//!
//! let expr: Expr = ast_expr.into();
//! assert_eq!(expr, Expr::Add(vec![Expr::sym("x"), Expr::sym("y"), Expr::sym("z")]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form by applying the rules in
//! [`simplify::rules`] over several passes, until a pass leaves the expression unchanged. Rules
//! cover combining like terms and factors, distributing multiplication over addition, exact
//! arithmetic on rational numbers, powers, and evaluating the known functions, including
//! [`derivative`]s and [`integral`]s.
//!
//! ```
//! use oasis_compute::symbolic::{simplify, Expr};
//! use oasis_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let mut parser = Parser::new("x+x+x");
//! let ast_expr = parser.try_parse_full::<AstExpr>().unwrap();
//! let simplified = simplify(&ast_expr.into()).unwrap();
//!
//! assert_eq!(simplified, Expr::Mul(vec![Expr::num(3), Expr::sym("x")]));
//! ```

pub mod derivative;
pub mod expr;
pub mod integral;
pub mod simplify;
pub mod step_collector;

pub use expr::{Expr, Primary};
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::{StepCollector, StepCount};

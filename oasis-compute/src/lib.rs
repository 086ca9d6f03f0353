//! Exact symbolic simplification, calculus and rendering for Oasis expressions.
//!
//! This crate is the engine behind an Oasis session. It takes the abstract syntax tree produced
//! by [`oasis_parser`], converts it into a flattened [`Expr`], reduces it to a canonical form
//! with [`simplify()`], and renders the result as plain text or presentation MathML.
//!
//! All arithmetic is exact: numbers are arbitrary-precision [`rug::Rational`]s, so `0.1+0.2`
//! simplifies to `3/10`.
//!
//! ```
//! use oasis_compute::{render, simplify, Expr, MarkupFormat};
//! use oasis_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let ast = Parser::new("dd(x^3,x)").try_parse_full::<AstExpr>().unwrap();
//! let simplified = simplify(&Expr::from(ast)).unwrap();
//!
//! assert_eq!(render(&simplified, MarkupFormat::Text), "3x^2");
//! ```

pub mod error;
pub mod funcs;
pub mod primitive;
pub mod render;
pub mod symbolic;

pub use error::Error;
pub use render::{render, MarkupFormat};
pub use symbolic::{simplify, simplify_with, Expr};

//! Tokenizer, normalizer and parser for the infix expressions typed into an Oasis session.
//!
//! Raw user input first goes through [`preprocess()`], which rewrites it into the canonical form
//! accepted by the [`parser`]: whitespace is removed, implicit multiplication is made explicit,
//! and function names are canonicalized. The [`parser::Parser`] then builds a spanned abstract
//! syntax tree from the normalized text.
//!
//! ```
//! use oasis_parser::{parser::{ast::Expr, Parser}, preprocess};
//!
//! let normalized = preprocess("2x + 3x");
//! assert_eq!(normalized, "2*x+3*x");
//!
//! let expr = Parser::new(&normalized).try_parse_full::<Expr>();
//! assert!(expr.is_ok());
//! ```

pub mod parser;
pub mod preprocess;
pub mod tokenizer;

pub use preprocess::preprocess;

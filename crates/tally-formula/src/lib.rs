//! # tally-formula
//!
//! Expression builder and arithmetic evaluator for tally.
//!
//! This crate provides:
//! - Expression building (tokens → text), with implicit `+` between operands
//! - Expression parsing (text → AST)
//! - Expression evaluation (AST → number)
//! - [`calculate`], which runs the whole pipeline and never fails
//!
//! ## Example
//!
//! ```rust
//! use tally_core::{StaticRegistry, Token};
//! use tally_formula::{calculate, CalculatedValue};
//!
//! let registry: StaticRegistry = [("Revenue", 100.0)].into_iter().collect();
//! let tokens = vec![Token::number("a", "2"), Token::tag("b", "Revenue")];
//!
//! let (expression, value) = calculate(&tokens, &registry);
//! assert_eq!(expression, "2+100");
//! assert_eq!(value, CalculatedValue::Number(102.0));
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod value;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use builder::{build_expression, needs_implicit_operator, IMPLICIT_OPERATOR};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_expression};
pub use parser::parse_expression;
pub use value::{calculate, CalculatedValue, ERROR_TEXT};

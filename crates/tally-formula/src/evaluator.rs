//! Expression evaluator
//!
//! Walks a parsed AST and produces a finite number. Nothing in the expression
//! text is ever executed as code.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_expression;

/// Parse and evaluate an expression string
///
/// # Example
/// ```rust
/// use tally_formula::{evaluate_expression, FormulaError};
///
/// assert_eq!(evaluate_expression("2+100").unwrap(), 102.0);
/// assert_eq!(evaluate_expression("1/0"), Err(FormulaError::DivisionByZero));
/// ```
pub fn evaluate_expression(expression: &str) -> FormulaResult<f64> {
    let ast = parse_expression(expression)?;
    let value = evaluate(&ast)?;
    tracing::trace!(expression, value, "expression evaluated");
    Ok(value)
}

/// Evaluate an expression AST
pub fn evaluate(expr: &FormulaExpr) -> FormulaResult<f64> {
    match expr {
        FormulaExpr::Number(n) => finite(*n, "literal"),

        FormulaExpr::Identifier(name) => Err(FormulaError::UnknownIdentifier(name.clone())),

        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right),

        FormulaExpr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
) -> FormulaResult<f64> {
    // Evaluate operands first
    let l = evaluate(left)?;
    let r = evaluate(right)?;

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 {
                return Err(FormulaError::DivisionByZero);
            }
            l / r
        }
        BinaryOperator::Power => l.powf(r),
    };

    finite(result, &format!("{} {} {}", l, op.symbol(), r))
}

/// Evaluate a unary operation
fn evaluate_unary_op(op: UnaryOperator, operand: &FormulaExpr) -> FormulaResult<f64> {
    let n = evaluate(operand)?;

    match op {
        UnaryOperator::Negate => Ok(-n),
        UnaryOperator::Plus => Ok(n),
    }
}

fn finite(n: f64, what: &str) -> FormulaResult<f64> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::NonFinite(what.to_string()))
    }
}

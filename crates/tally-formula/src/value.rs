//! Displayed formula value

use crate::builder::build_expression;
use crate::error::FormulaError;
use crate::evaluator::evaluate_expression;
use std::fmt;
use tally_core::{Registry, Token};

/// Text shown for any evaluation failure
pub const ERROR_TEXT: &str = "Error";

/// Result of recomputing a token list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CalculatedValue {
    /// No tokens; nothing to show
    #[default]
    Unset,
    /// Finite result
    Number(f64),
    /// Evaluation failed
    Error(FormulaError),
}

impl CalculatedValue {
    /// Numeric result, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CalculatedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this is the unset value
    pub fn is_unset(&self) -> bool {
        matches!(self, CalculatedValue::Unset)
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, CalculatedValue::Error(_))
    }

    /// Get the error if this is one
    pub fn get_error(&self) -> Option<&FormulaError> {
        match self {
            CalculatedValue::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CalculatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatedValue::Unset => Ok(()),
            CalculatedValue::Number(n) => {
                // No trailing ".0" on whole numbers
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CalculatedValue::Error(_) => f.write_str(ERROR_TEXT),
        }
    }
}

/// Build and evaluate `tokens`
///
/// Never fails: an empty list is [`CalculatedValue::Unset`] and every
/// evaluation failure becomes [`CalculatedValue::Error`].
///
/// Returns the built expression alongside the value.
pub fn calculate<R: Registry + ?Sized>(
    tokens: &[Token],
    registry: &R,
) -> (String, CalculatedValue) {
    if tokens.is_empty() {
        return (String::new(), CalculatedValue::Unset);
    }

    let expression = build_expression(tokens, registry);
    let value = match evaluate_expression(&expression) {
        Ok(n) => CalculatedValue::Number(n),
        Err(e) => {
            tracing::warn!(
                expression = %expression,
                error = %e,
                arithmetic = e.is_arithmetic(),
                "error evaluating expression"
            );
            CalculatedValue::Error(e)
        }
    };

    (expression, value)
}

//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during expression parsing or evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Malformed expression syntax
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unresolved tag placeholder used as an operand
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result is infinite or not a number
    #[error("Non-finite result: {0}")]
    NonFinite(String),
}

impl FormulaError {
    /// Check if this is an arithmetic failure rather than a syntax one
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, FormulaError::DivisionByZero | FormulaError::NonFinite(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_arithmetic() {
        assert!(FormulaError::DivisionByZero.is_arithmetic());
        assert!(FormulaError::NonFinite("10 ^ 400".into()).is_arithmetic());
        assert!(!FormulaError::Parse("Empty parentheses".into()).is_arithmetic());
        assert!(!FormulaError::UnknownIdentifier("Revenue".into()).is_arithmetic());
    }
}

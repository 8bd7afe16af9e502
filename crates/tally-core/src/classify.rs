//! Raw input classification
//!
//! Decides which [`TokenType`] a committed piece of text becomes. Rules are
//! applied in order:
//!
//! 1. blank input is rejected outright
//! 2. a complete, finite decimal literal is a `number`
//! 3. a run of `+ - * / ^ ( )` characters is an `operator`
//! 4. anything else is a `tag`

use crate::error::{Error, Result};
use crate::token::TokenType;
use lazy_regex::regex_is_match;

/// Classify raw input
///
/// # Example
/// ```rust
/// use tally_core::{classify, TokenType};
///
/// assert_eq!(classify("42").unwrap(), TokenType::Number);
/// assert_eq!(classify("+").unwrap(), TokenType::Operator);
/// assert_eq!(classify("Revenue").unwrap(), TokenType::Tag);
/// assert!(classify("   ").is_err());
/// ```
pub fn classify(input: &str) -> Result<TokenType> {
    let input = validate_input(input)?;

    if is_number(input) {
        Ok(TokenType::Number)
    } else if is_operator_run(input) {
        Ok(TokenType::Operator)
    } else {
        Ok(TokenType::Tag)
    }
}

/// Trim input, rejecting it if nothing remains
pub fn validate_input(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::BlankInput);
    }
    Ok(trimmed)
}

/// Whether the whole string is a finite decimal literal
///
/// Spellings such as `inf` or `NaN` and literals that overflow are not numbers.
pub fn is_number(input: &str) -> bool {
    input
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Whether the whole string is one or more operator/paren characters
pub fn is_operator_run(input: &str) -> bool {
    regex_is_match!(r"^[+\-*/^()]+$", input)
}

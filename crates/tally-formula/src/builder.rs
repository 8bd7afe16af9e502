//! Expression building
//!
//! Turns an ordered token list into expression text for the evaluator.
//!
//! - `number` and `operator` tokens are emitted verbatim
//! - `tag` tokens resolve through the [`Registry`]; unresolved names become a
//!   parenthesised placeholder with whitespace removed, which the evaluator
//!   rejects unless it happens to be valid arithmetic
//! - two neighbouring operands with no operator between them are joined with `+`

use tally_core::{Registry, Token, TokenType};

/// Operator inserted between juxtaposed operands
pub const IMPLICIT_OPERATOR: char = '+';

/// Build expression text from `tokens`
///
/// # Example
/// ```rust
/// use tally_core::{StaticRegistry, Token};
/// use tally_formula::build_expression;
///
/// let registry: StaticRegistry = [("Revenue", 100.0)].into_iter().collect();
/// let tokens = vec![Token::number("a", "2"), Token::tag("b", "Revenue")];
/// assert_eq!(build_expression(&tokens, &registry), "2+100");
/// ```
pub fn build_expression<R: Registry + ?Sized>(tokens: &[Token], registry: &R) -> String {
    let mut expr = String::new();

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && needs_implicit_operator(&tokens[i - 1], token) {
            expr.push(IMPLICIT_OPERATOR);
        }
        emit_token(&mut expr, token, registry);
    }

    tracing::trace!(tokens = tokens.len(), expression = %expr, "expression built");
    expr
}

/// Whether `+` goes between `left` and `right`
pub fn needs_implicit_operator(left: &Token, right: &Token) -> bool {
    left.kind.is_operand() && right.kind.is_operand()
}

fn emit_token<R: Registry + ?Sized>(expr: &mut String, token: &Token, registry: &R) {
    match token.kind {
        TokenType::Number | TokenType::Operator => expr.push_str(&token.value),
        TokenType::Tag => match registry.lookup(&token.value) {
            Some(n) => expr.push_str(&n.to_string()),
            None => {
                expr.push('(');
                expr.extend(token.value.chars().filter(|c| !c.is_whitespace()));
                expr.push(')');
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate_expression;
    use proptest::prelude::*;
    use tally_core::{EmptyRegistry, StaticRegistry};

    fn registry() -> StaticRegistry {
        [("Revenue", 100.0), ("Expense", 50.0), ("Profit", 20.0), ("Rate", 0.25)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_implicit_addition() {
        let tokens = vec![Token::number("1", "2"), Token::tag("2", "Revenue")];
        assert_eq!(build_expression(&tokens, &registry()), "2+100");
    }

    #[test]
    fn test_explicit_operator_joins_directly() {
        let tokens = vec![
            Token::tag("1", "Revenue"),
            Token::operator("2", "-"),
            Token::tag("3", "Expense"),
            Token::operator("4", "*"),
            Token::number("5", "2"),
        ];
        assert_eq!(build_expression(&tokens, &registry()), "100-50*2");
    }

    #[test]
    fn test_paren_operators_block_implicit_addition() {
        let tokens = vec![
            Token::number("1", "3"),
            Token::operator("2", "("),
            Token::number("3", "1"),
            Token::number("4", "2"),
            Token::operator("5", ")"),
        ];
        assert_eq!(build_expression(&tokens, &registry()), "3(1+2)");
    }

    #[test]
    fn test_unresolved_tag_placeholder() {
        let tokens = vec![Token::tag("1", "Unknown")];
        assert_eq!(build_expression(&tokens, &EmptyRegistry), "(Unknown)");

        let tokens = vec![Token::tag("1", " Net  Income ")];
        assert_eq!(build_expression(&tokens, &EmptyRegistry), "(NetIncome)");
    }

    #[test]
    fn test_fractional_and_negative_lookups() {
        let mut registry = registry();
        registry.define("Loss", -7.5);
        let tokens = vec![Token::tag("1", "Rate"), Token::tag("2", "Loss")];
        assert_eq!(build_expression(&tokens, &registry), "0.25+-7.5");
    }

    #[test]
    fn test_consecutive_numbers() {
        let tokens = vec![
            Token::number("1", "1"),
            Token::number("2", "2"),
            Token::number("3", "3"),
        ];
        assert_eq!(build_expression(&tokens, &EmptyRegistry), "1+2+3");
    }

    #[test]
    fn test_empty() {
        assert_eq!(build_expression(&[], &registry()), "");
    }

    proptest! {
        #[test]
        fn prop_juxtaposed_numbers_sum(values in prop::collection::vec(0u32..10_000, 1..30)) {
            let tokens: Vec<Token> = values
                .iter()
                .enumerate()
                .map(|(i, v)| Token::number(i.to_string(), v.to_string()))
                .collect();

            let expr = build_expression(&tokens, &EmptyRegistry);
            prop_assert_eq!(expr.matches(IMPLICIT_OPERATOR).count(), values.len() - 1);

            let expected: f64 = values.iter().map(|v| f64::from(*v)).sum();
            prop_assert_eq!(evaluate_expression(&expr).unwrap(), expected);
        }
    }
}

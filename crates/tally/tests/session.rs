//! Tests for editing sessions: token edits, recomputation and display values

use pretty_assertions::assert_eq;
use tally::prelude::*;
use tally::{calculate, Error as TallyError};

fn demo_registry() -> StaticRegistry {
    [("Revenue", 100.0), ("Expense", 50.0), ("Profit", 20.0)]
        .into_iter()
        .collect()
}

fn session() -> EditingSession<StaticRegistry, SequentialIds> {
    EditingSession::new(demo_registry(), SequentialIds::new())
}

fn commit_all(session: &mut EditingSession<StaticRegistry, SequentialIds>, inputs: &[&str]) {
    for text in inputs {
        session.set_input(*text);
        session.commit_input();
    }
}

fn kinds(session: &EditingSession<StaticRegistry, SequentialIds>) -> Vec<TokenType> {
    session.tokens().iter().map(|t| t.kind).collect()
}

/// Test that an empty session shows the unset value
#[test]
fn test_empty_session_is_unset() {
    let session = session();
    assert_eq!(session.value(), &CalculatedValue::Unset);
    assert_eq!(session.value().to_string(), "");
    assert_eq!(session.recompute_count(), 0);
}

/// Test implicit addition between a number and a resolved tag
#[test]
fn test_number_then_tag() {
    let mut session = session();
    commit_all(&mut session, &["2", "Revenue"]);

    assert_eq!(kinds(&session), vec![TokenType::Number, TokenType::Tag]);
    assert_eq!(session.expression(), "2+100");
    assert_eq!(session.value(), &CalculatedValue::Number(102.0));
}

/// Test explicit operators, precedence and parentheses
#[test]
fn test_operators_and_parentheses() {
    let mut session = session();
    commit_all(&mut session, &["(", "Revenue", "-", "Expense", ")", "/", "Profit"]);

    assert_eq!(session.expression(), "(100-50)/20");
    assert_eq!(session.value(), &CalculatedValue::Number(2.5));
    assert_eq!(session.value().to_string(), "2.5");
}

/// Test that an unknown tag produces the error value
#[test]
fn test_unknown_tag_is_error() {
    let mut session = session();
    commit_all(&mut session, &["Unknown"]);

    assert_eq!(session.expression(), "(Unknown)");
    assert!(session.value().is_error());
    assert_eq!(session.value().to_string(), "Error");
}

/// Test that errors recover once the formula is corrected
#[test]
fn test_error_recovers() {
    let mut session = session();
    commit_all(&mut session, &["1", "/", "0"]);
    assert_eq!(
        session.value(),
        &CalculatedValue::Error(FormulaError::DivisionByZero)
    );

    session.backspace();
    commit_all(&mut session, &["4"]);
    assert_eq!(session.value(), &CalculatedValue::Number(0.25));
}

/// Test dangling operators and unbalanced parentheses
#[test]
fn test_malformed_formulas() {
    let mut session = session();
    commit_all(&mut session, &["2", "*"]);
    assert!(matches!(
        session.value(),
        CalculatedValue::Error(FormulaError::Parse(_))
    ));

    session.clear();
    commit_all(&mut session, &["(", "2"]);
    assert!(matches!(
        session.value(),
        CalculatedValue::Error(FormulaError::Parse(_))
    ));
}

/// Test that blank input never becomes a token
#[test]
fn test_blank_commit_is_ignored() {
    let mut session = session();
    session.set_input("   ");
    assert_eq!(session.commit_input(), None);
    assert!(session.tokens().is_empty());
    assert_eq!(session.input(), "   ");
    assert_eq!(session.recompute_count(), 0);
}

/// Test that committed text is trimmed before classification
#[test]
fn test_commit_trims() {
    let mut session = session();
    session.set_input("  42 ");
    session.commit_input().unwrap();
    assert_eq!(session.tokens()[0].value, "42");
    assert_eq!(session.tokens()[0].kind, TokenType::Number);
    assert_eq!(session.input(), "");
}

/// Test that picking a suggestion adds a tag holding the suggestion key
#[test]
fn test_pick_suggestion() {
    let mut session = session();
    let candidates = vec![
        Suggestion::new("Revenue", "Total Revenue"),
        Suggestion::new("Expense", "Operating Expense"),
    ];

    session.set_input("rev");
    let matches = session.suggestions(&candidates);
    assert_eq!(matches, vec![candidates[0].clone()]);

    let id = session.pick_suggestion(&matches[0]);
    assert_eq!(session.input(), "");
    assert_eq!(session.tokens()[0].id, id);
    assert_eq!(session.tokens()[0].kind, TokenType::Tag);
    assert_eq!(session.tokens()[0].value, "Revenue");
    assert_eq!(session.value(), &CalculatedValue::Number(100.0));
}

/// Test that a numeric-looking suggestion key still becomes a tag
#[test]
fn test_pick_numeric_key_stays_tag() {
    let mut session = session();
    session.pick_suggestion(&Suggestion::new("42", "Answer"));
    assert_eq!(session.tokens()[0].kind, TokenType::Tag);
    assert_eq!(session.expression(), "(42)");
    assert_eq!(session.value(), &CalculatedValue::Number(42.0));
}

/// Test that suggestions are hidden for empty input and capped by options
#[test]
fn test_suggestions_respect_input_and_limit() {
    let candidates = vec![
        Suggestion::new("a", "Revenue A"),
        Suggestion::new("b", "Revenue B"),
        Suggestion::new("c", "Revenue C"),
    ];

    let mut session = EditingSession::with_options(
        demo_registry(),
        SequentialIds::new(),
        SessionOptions {
            max_suggestions: Some(2),
        },
    );
    assert!(session.suggestions(&candidates).is_empty());

    session.set_input("revenue");
    assert_eq!(session.suggestions(&candidates).len(), 2);
}

/// Test backspace semantics: edit input first, then delete tokens
#[test]
fn test_backspace() {
    let mut session = session();
    commit_all(&mut session, &["2", "+", "3"]);
    let before = session.recompute_count();

    session.set_input("ab");
    assert_eq!(session.backspace(), None);
    assert_eq!(session.input(), "a");
    assert_eq!(session.backspace(), None);
    assert_eq!(session.input(), "");
    assert_eq!(session.tokens().len(), 3);
    assert_eq!(session.recompute_count(), before);

    let removed = session.backspace().unwrap();
    assert_eq!(removed.value, "3");
    assert_eq!(session.tokens().len(), 2);
    assert_eq!(session.recompute_count(), before + 1);

    session.backspace();
    session.backspace();
    assert!(session.tokens().is_empty());
    assert_eq!(session.value(), &CalculatedValue::Unset);
    assert_eq!(session.backspace(), None);
}

/// Test that each change recomputes exactly once and typing never does
#[test]
fn test_recompute_once_per_change() {
    let mut session = session();

    session.set_input("1");
    session.push_input("2");
    assert_eq!(session.recompute_count(), 0);

    session.commit_input();
    assert_eq!(session.recompute_count(), 1);

    let id = session.tokens()[0].id.clone();
    session.update_token(&id, "5").unwrap();
    assert_eq!(session.recompute_count(), 2);

    assert!(!session.remove_token(&TokenId::new("missing")));
    assert_eq!(session.recompute_count(), 2);

    assert!(session.remove_token(&id));
    assert_eq!(session.recompute_count(), 3);

    session.clear();
    assert_eq!(session.recompute_count(), 3);
}

/// Test insertion at an index and out of range
#[test]
fn test_insert_token() {
    let mut session = session();
    commit_all(&mut session, &["2", "3"]);

    session.insert_token("*", 1).unwrap();
    assert_eq!(session.expression(), "2*3");
    assert_eq!(session.value(), &CalculatedValue::Number(6.0));

    let err = session.insert_token("4", 9).unwrap_err();
    assert!(matches!(
        err,
        TallyError::Core(tally_core::Error::IndexOutOfRange { index: 9, len: 3 })
    ));

    let err = session.insert_token(" ", 0).unwrap_err();
    assert!(matches!(err, TallyError::Core(tally_core::Error::BlankInput)));
}

/// Test that updates keep the token type fixed at creation
#[test]
fn test_update_keeps_type() {
    let mut session = session();
    commit_all(&mut session, &["2", "Revenue"]);

    let id = session.tokens()[0].id.clone();
    session.update_token(&id, "Profit").unwrap();
    assert_eq!(session.tokens()[0].kind, TokenType::Number);
    assert_eq!(session.expression(), "Profit+100");
    assert!(session.value().is_error());

    session.update_token(&id, "7").unwrap();
    assert_eq!(session.value(), &CalculatedValue::Number(107.0));

    assert!(session.update_token(&id, "  ").is_err());
    assert!(matches!(
        session.update_token(&TokenId::new("nope"), "1"),
        Err(TallyError::Core(tally_core::Error::TokenNotFound(_)))
    ));
}

/// Test that evaluating the same tokens twice gives the same answer
#[test]
fn test_evaluation_is_repeatable() {
    let mut session = session();
    commit_all(&mut session, &["Revenue", "^", "2", "/", "3"]);

    let tokens = session.snapshot();
    let first = calculate(&tokens, session.registry());
    let second = calculate(&tokens, session.registry());
    assert_eq!(first, second);
    assert_eq!(&first.1, session.value());
}

/// Test that snapshots taken earlier are unaffected by later edits
#[test]
fn test_snapshot_isolation() {
    let mut session = session();
    commit_all(&mut session, &["1", "+", "2"]);
    let snapshot = session.snapshot();

    session.clear();
    assert_eq!(snapshot.len(), 3);
    assert!(session.tokens().is_empty());
}

/// Test explicit recomputation when a shared registry value changes
#[test]
fn test_recompute_after_registry_change() {
    use std::cell::Cell;
    use std::rc::Rc;
    use tally::FnRegistry;

    let revenue = Rc::new(Cell::new(100.0));
    let source = Rc::clone(&revenue);
    let registry = FnRegistry(move |name: &str| (name == "Revenue").then(|| source.get()));

    let mut session = EditingSession::new(registry, SequentialIds::new());
    session.set_input("Revenue");
    session.commit_input();
    assert_eq!(session.value(), &CalculatedValue::Number(100.0));

    revenue.set(250.0);
    assert_eq!(session.value(), &CalculatedValue::Number(100.0));
    assert_eq!(session.recompute(), &CalculatedValue::Number(250.0));
    assert_eq!(session.recompute_count(), 2);
}

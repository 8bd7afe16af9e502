//! Suggestion matching
//!
//! Suggestions arrive wholesale from an external source, possibly unordered and
//! with duplicate keys. Filtering and deduplication happen here.

use ahash::AHashSet;

/// A named reference offered while typing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    /// Unique key; becomes the tag token's value when picked
    pub value: String,
    /// Display name matched against the user's input
    pub name: String,
}

impl Suggestion {
    /// Create a suggestion
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// Filter `candidates` against partial input
///
/// Empty input matches nothing. Otherwise a candidate matches when its name
/// contains the input, ignoring case. Later candidates repeating an earlier
/// match's `value` are dropped.
///
/// # Example
/// ```rust
/// use tally_core::{match_suggestions, Suggestion};
///
/// let candidates = vec![
///     Suggestion::new("A", "Revenue"),
///     Suggestion::new("A", "Rev2"),
///     Suggestion::new("B", "Revenue2"),
/// ];
/// let matched = match_suggestions("rev", &candidates);
/// assert_eq!(matched, vec![candidates[0].clone(), candidates[2].clone()]);
/// ```
pub fn match_suggestions(partial: &str, candidates: &[Suggestion]) -> Vec<Suggestion> {
    if partial.is_empty() {
        return Vec::new();
    }

    let needle = partial.to_lowercase();
    let mut seen = AHashSet::new();

    candidates
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .filter(|s| seen.insert(s.value.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidates() -> Vec<Suggestion> {
        vec![
            Suggestion::new("rev", "Revenue"),
            Suggestion::new("exp", "Expense"),
            Suggestion::new("prof", "Gross Profit"),
            Suggestion::new("prof", "Profit"),
            Suggestion::new("net", "Net Revenue"),
        ]
    }

    #[test]
    fn test_empty_input_matches_nothing() {
        assert!(match_suggestions("", &candidates()).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let matched = match_suggestions("REV", &candidates());
        let values: Vec<&str> = matched.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["rev", "net"]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let matched = match_suggestions("profit", &candidates());
        assert_eq!(matched, vec![Suggestion::new("prof", "Gross Profit")]);
    }

    #[test]
    fn test_duplicate_key_outside_filter_does_not_shadow() {
        let list = vec![
            Suggestion::new("A", "Alpha"),
            Suggestion::new("A", "Revenue"),
        ];
        assert_eq!(
            match_suggestions("rev", &list),
            vec![Suggestion::new("A", "Revenue")]
        );
    }

    #[test]
    fn test_no_match() {
        assert!(match_suggestions("zzz", &candidates()).is_empty());
    }

    #[test]
    fn test_mixed_key_example() {
        let list = vec![
            Suggestion::new("A", "Revenue"),
            Suggestion::new("A", "Rev2"),
            Suggestion::new("B", "Revenue2"),
        ];
        let matched = match_suggestions("rev", &list);
        assert_eq!(
            matched,
            vec![
                Suggestion::new("A", "Revenue"),
                Suggestion::new("B", "Revenue2")
            ]
        );
    }
}

//! Token data model
//!
//! A formula is an ordered list of [`Token`]s. Each token carries an opaque
//! [`TokenId`], a [`TokenType`] fixed when the token is created, and the raw
//! text the user committed (or the key of a picked suggestion).

use std::fmt;

/// Opaque, caller-supplied token identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TokenId(String);

impl TokenId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenType {
    /// Numeric literal, e.g. `42` or `3.5e2`
    Number,
    /// Run of operator/paren characters, e.g. `+` or `)*(`
    Operator,
    /// Named reference resolved through a registry
    Tag,
}

impl TokenType {
    /// Lowercase name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Number => "number",
            TokenType::Operator => "operator",
            TokenType::Tag => "tag",
        }
    }

    /// Whether this kind is an operand (anything but an operator)
    pub fn is_operand(&self) -> bool {
        !matches!(self, TokenType::Operator)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single formula token
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub id: TokenId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TokenType,
    pub value: String,
}

impl Token {
    /// Create a token
    pub fn new(id: impl Into<TokenId>, kind: TokenType, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: value.into(),
        }
    }

    /// Create a number token
    pub fn number(id: impl Into<TokenId>, value: impl Into<String>) -> Self {
        Self::new(id, TokenType::Number, value)
    }

    /// Create an operator token
    pub fn operator(id: impl Into<TokenId>, value: impl Into<String>) -> Self {
        Self::new(id, TokenType::Operator, value)
    }

    /// Create a tag token
    pub fn tag(id: impl Into<TokenId>, value: impl Into<String>) -> Self {
        Self::new(id, TokenType::Tag, value)
    }

    /// Check if this is an operator token
    pub fn is_operator(&self) -> bool {
        self.kind == TokenType::Operator
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let t = Token::number("a", "2");
        assert_eq!(t.kind, TokenType::Number);
        assert_eq!(t.id.as_str(), "a");

        assert!(Token::operator("b", "+").is_operator());
        assert!(!Token::tag("c", "Revenue").is_operator());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::tag("x", "Revenue").to_string(), "tag:Revenue");
        assert_eq!(TokenType::Operator.to_string(), "operator");
        assert_eq!(TokenId::new("tok-1").to_string(), "tok-1");
    }

    #[test]
    fn test_is_operand() {
        assert!(TokenType::Number.is_operand());
        assert!(TokenType::Tag.is_operand());
        assert!(!TokenType::Operator.is_operand());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let t = Token::number("id-1", "42");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "id-1", "type": "number", "value": "42" })
        );
    }
}

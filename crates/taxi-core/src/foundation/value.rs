//! Literal values appearing in constraints, enum members and defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value.
///
/// Decimals keep their source text so that no precision is lost and the
/// type stays `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Decimal(String),
    String(String),
    Null,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn decimal(value: impl Into<String>) -> Self {
        Value::Decimal(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render as a Taxi literal, quoting strings.
    pub fn as_taxi(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            other => other.to_string(),
        }
    }
}

/// Textual form without quotes; enum lookups compare on this.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(Value::from("USD").to_string(), "USD");
        assert_eq!(Value::Int(1).to_string(), "1");
        assert_eq!(Value::decimal("1.50").to_string(), "1.50");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_as_taxi_quotes_strings() {
        assert_eq!(Value::from("GBP").as_taxi(), "\"GBP\"");
        assert_eq!(Value::from(true).as_taxi(), "true");
    }
}

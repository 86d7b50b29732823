//! Record identifiers.
//!
//! Ids assigned by this crate are random UUID strings. Records created by the
//! web planner carry numeric ids (`Date.now() + Math.random()`); those
//! are kept as numbers so equality filters keep matching after an import.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

/// Identifier of a record, unique within its table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Not yet assigned; the store replaces it on insert.
    #[default]
    #[serde(skip)]
    Unassigned,
    Text(String),
    Number(Number),
}

impl RecordId {
    /// Generate a new random id.
    pub fn new() -> Self {
        RecordId::Text(Uuid::new_v4().to_string())
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, RecordId::Unassigned)
    }

    /// The JSON value this id is stored as.
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Unassigned => Value::Null,
            RecordId::Text(s) => Value::String(s.clone()),
            RecordId::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Unassigned => f.write_str("<unassigned>"),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Errors from parsing a record id typed by a user.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Invalid record id: '{0}'")]
pub struct RecordIdError(String);

impl FromStr for RecordId {
    type Err = RecordIdError;

    /// Parses user input: numeric text becomes a numeric id, anything else a
    /// text id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RecordIdError(s.to_string()));
        }

        if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            if let Ok(Value::Number(n)) = serde_json::from_str::<Value>(s) {
                return Ok(RecordId::Number(n));
            }
        }

        Ok(RecordId::Text(s.to_string()))
    }
}

impl From<&RecordId> for Value {
    fn from(id: &RecordId) -> Self {
        id.to_value()
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        id.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn test_default_is_unassigned() {
        assert!(RecordId::default().is_unassigned());
        assert!(!RecordId::new().is_unassigned());
    }

    #[test]
    fn test_parse_text_id() {
        let id: RecordId = "3f0c8a52-6a1e-4d8e-9b1f-2f7d2b1a0c11".parse().unwrap();
        assert_eq!(
            id,
            RecordId::Text("3f0c8a52-6a1e-4d8e-9b1f-2f7d2b1a0c11".to_string())
        );
    }

    #[test]
    fn test_parse_legacy_numeric_id() {
        let id: RecordId = "1704450000000.123".parse().unwrap();
        assert!(matches!(id, RecordId::Number(_)));
        assert_eq!(id.to_value(), serde_json::json!(1704450000000.123));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!("  ".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let text: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(text, RecordId::Text("abc".to_string()));

        let number: RecordId = serde_json::from_str("42.5").unwrap();
        assert_eq!(number.to_string(), "42.5");
    }
}

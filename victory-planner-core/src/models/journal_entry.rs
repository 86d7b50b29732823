use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::record_id::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Identity,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(user_id: Identity, text: impl Into<String>) -> Self {
        Self {
            id: RecordId::Unassigned,
            user_id,
            text: text.into(),
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_web_timestamp() {
        let json = r#"{"text":"Good day","date":"2024-01-05T18:30:00.000Z","user_id":"u","id":"a"}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date.to_rfc3339(), "2024-01-05T18:30:00+00:00");
    }
}

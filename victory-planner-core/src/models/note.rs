use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::record_id::RecordId;

/// Title given to notes with no content.
pub const UNTITLED: &str = "New Note";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Identity,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: DateTime<Utc>,
}

impl Note {
    /// An empty untitled note dated now.
    pub fn new(user_id: Identity) -> Self {
        Self {
            id: RecordId::Unassigned,
            user_id,
            title: UNTITLED.to_string(),
            content: String::new(),
            date: Utc::now(),
        }
    }

    /// Title derived from content: the first line, trimmed, or [`UNTITLED`].
    pub fn title_for(content: &str) -> String {
        let first_line = content.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            UNTITLED.to_string()
        } else {
            first_line.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_for() {
        assert_eq!(Note::title_for("Groceries\n- eggs"), "Groceries");
        assert_eq!(Note::title_for("  Padded  \nbody"), "Padded");
        assert_eq!(Note::title_for(""), UNTITLED);
        assert_eq!(Note::title_for("   \nsecond line"), UNTITLED);
    }

    #[test]
    fn test_new_note_is_untitled() {
        let note = Note::new(Identity::new("u"));
        assert_eq!(note.title, "New Note");
        assert!(note.content.is_empty());
    }
}

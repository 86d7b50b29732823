//! Snapshot codec.
//!
//! A snapshot is the whole dataset at one instant: the identity plus every
//! domain table. On the wire it is JSON with exactly the keys
//!
//! ```text
//! { userId, goals, tasks, habits, journalEntries, events, notes }
//! ```
//!
//! encoded as standard base64, so the code is plain ASCII that survives being
//! pasted into chat or email. The encoding is for transport only and offers
//! no secrecy.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use crate::identity::Identity;
use crate::store::Row;
use crate::table::Table;

/// Standard alphabet; padding is written on encode and optional on decode.
const CODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Full materialized content of the planner at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub user_id: Identity,
    pub goals: Vec<Row>,
    pub tasks: Vec<Row>,
    pub habits: Vec<Row>,
    pub journal_entries: Vec<Row>,
    pub events: Vec<Row>,
    pub notes: Vec<Row>,
}

impl Snapshot {
    /// An empty snapshot owned by `user_id`.
    pub fn new(user_id: Identity) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Rows of one table.
    pub fn table(&self, table: Table) -> &[Row] {
        match table {
            Table::Goals => &self.goals,
            Table::Tasks => &self.tasks,
            Table::Habits => &self.habits,
            Table::JournalEntries => &self.journal_entries,
            Table::Events => &self.events,
            Table::Notes => &self.notes,
        }
    }

    /// Mutable rows of one table.
    pub fn table_mut(&mut self, table: Table) -> &mut Vec<Row> {
        match table {
            Table::Goals => &mut self.goals,
            Table::Tasks => &mut self.tasks,
            Table::Habits => &mut self.habits,
            Table::JournalEntries => &mut self.journal_entries,
            Table::Events => &mut self.events,
            Table::Notes => &mut self.notes,
        }
    }

    /// Total number of records across all tables.
    pub fn record_count(&self) -> usize {
        Table::ALL.iter().map(|t| self.table(*t).len()).sum()
    }

    /// Encodes this snapshot as a sync code.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        let json = serde_json::to_vec(self).map_err(SnapshotError::Encode)?;
        Ok(CODE_ENGINE.encode(json))
    }

    /// Decodes a sync code.
    ///
    /// Whitespace anywhere in the code is ignored, so wrapped or padded
    /// pastes still decode. Nothing is partially recovered: either the whole
    /// snapshot parses or an error is returned.
    pub fn decode(code: &str) -> Result<Self, SnapshotError> {
        let compact: String = code.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if compact.is_empty() {
            return Err(SnapshotError::Empty);
        }

        let json = CODE_ENGINE.decode(compact.as_bytes())?;
        Ok(serde_json::from_slice(&json)?)
    }
}

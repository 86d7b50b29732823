//! Table store: named collections of records over key/value storage.
//!
//! A table is a JSON array of objects stored under `victory_planner_<table>`.
//! Tables come into existence on first write and are read back whole for
//! every operation.
//!
//! Failure policy: an unreadable or corrupt table reads as empty, and a
//! failed write is logged and otherwise ignored. Filters that match nothing
//! are silent no-ops.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::identity::Identity;
use crate::models::Record;
use crate::record_id::RecordId;
use crate::storage::{namespaced, KeyValueStorage};

/// A record as stored: a map of field names to JSON values.
pub type Row = Map<String, Value>;

/// Field holding a record's id.
pub const ID_FIELD: &str = "id";

/// Field holding a record's owner.
pub const USER_ID_FIELD: &str = "user_id";

/// Store of named tables.
#[derive(Debug, Clone)]
pub struct TableStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> TableStore<S> {
    /// Create a new table store over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns every row of a table in stored order.
    pub fn rows(&self, table: impl AsRef<str>) -> Vec<Row> {
        let table = table.as_ref();

        match self.storage.get(&namespaced(table)) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Row>>(&raw) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("Table {} is corrupt, reading as empty: {}", table, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read table {}: {}", table, e);
                Vec::new()
            }
        }
    }

    /// Overwrites a table with `rows`.
    pub fn replace(&self, table: impl AsRef<str>, rows: &[Row]) {
        self.persist(table.as_ref(), rows);
    }

    /// Appends records, giving each a fresh id. Returns the records as stored.
    pub fn insert(&self, table: impl AsRef<str>, records: Vec<Row>) -> Vec<Row> {
        let table = table.as_ref();
        let mut rows = self.rows(table);

        let stored: Vec<Row> = records
            .into_iter()
            .map(|mut record| {
                record.insert(ID_FIELD.to_string(), RecordId::new().to_value());
                record
            })
            .collect();

        rows.extend(stored.iter().cloned());
        self.persist(table, &rows);

        tracing::debug!("Inserted {} row(s) into {}", stored.len(), table);
        stored
    }

    /// Returns the rows whose `column` equals `value`, in stored order.
    ///
    /// Rows without `column` never match.
    pub fn select(&self, table: impl AsRef<str>, column: &str, value: &Value) -> Vec<Row> {
        self.rows(table)
            .into_iter()
            .filter(|row| matches(row, column, value))
            .collect()
    }

    /// Merges `patch` into every row whose `column` equals `value`.
    ///
    /// The `id` field is never overwritten. Returns the number of rows updated.
    pub fn update(&self, table: impl AsRef<str>, column: &str, value: &Value, patch: &Row) -> usize {
        let table = table.as_ref();
        let mut rows = self.rows(table);
        let mut updated = 0;

        for row in rows.iter_mut() {
            if !matches(row, column, value) {
                continue;
            }
            merge(row, patch.clone());
            updated += 1;
        }

        if updated > 0 {
            self.persist(table, &rows);
        }

        tracing::debug!("Updated {} row(s) in {} where {} = {}", updated, table, column, value);
        updated
    }

    /// Removes every row whose `column` equals `value`. Returns the number removed.
    pub fn delete(&self, table: impl AsRef<str>, column: &str, value: &Value) -> usize {
        let table = table.as_ref();
        let mut rows = self.rows(table);
        let before = rows.len();

        rows.retain(|row| !matches(row, column, value));
        let removed = before - rows.len();

        if removed > 0 {
            self.persist(table, &rows);
        }

        tracing::debug!("Deleted {} row(s) from {} where {} = {}", removed, table, column, value);
        removed
    }

    /// Inserts or merges records by `match_key`.
    ///
    /// An incoming record whose `match_key` value is present and equal to an
    /// existing row's is merged into that row in place, keeping the row's id
    /// and position. Any other incoming record is appended with a fresh id.
    /// Existing rows that no incoming record matches are kept. Only rows
    /// stored before the call are matched against, so two incoming records
    /// sharing a new key are both inserted.
    ///
    /// Returns the records as stored, in incoming order.
    pub fn upsert(&self, table: impl AsRef<str>, records: Vec<Row>, match_key: &str) -> Vec<Row> {
        let table = table.as_ref();
        let mut rows = self.rows(table);
        let existing_len = rows.len();
        let mut stored = Vec::with_capacity(records.len());

        for record in records {
            let existing = record
                .get(match_key)
                .filter(|key| is_present(key))
                .and_then(|key| {
                    rows[..existing_len]
                        .iter()
                        .position(|row| row.get(match_key) == Some(key))
                });

            match existing {
                Some(index) => {
                    let row = &mut rows[index];
                    merge(row, record);
                    stored.push(row.clone());
                }
                None => {
                    let mut row = record;
                    row.insert(ID_FIELD.to_string(), RecordId::new().to_value());
                    rows.push(row.clone());
                    stored.push(row);
                }
            }
        }

        self.persist(table, &rows);

        tracing::debug!("Upserted {} row(s) into {} by {}", stored.len(), table, match_key);
        stored
    }

    // ==================== Typed Records ====================

    /// Inserts typed records into their table. Returns them with assigned ids.
    pub fn insert_records<R: Record>(&self, records: &[R]) -> Vec<R> {
        let rows = records.iter().filter_map(to_row).collect();
        self.insert(R::TABLE, rows)
            .into_iter()
            .filter_map(from_row)
            .collect()
    }

    /// Returns the typed records whose `column` equals `value`.
    ///
    /// Rows that do not fit the record type are skipped.
    pub fn select_records<R: Record>(&self, column: &str, value: impl Into<Value>) -> Vec<R> {
        self.select(R::TABLE, column, &value.into())
            .into_iter()
            .filter_map(from_row)
            .collect()
    }

    /// Returns the records owned by `identity`.
    pub fn owned_by<R: Record>(&self, identity: &Identity) -> Vec<R> {
        self.select_records(USER_ID_FIELD, identity)
    }

    /// Looks up a record by id.
    pub fn find<R: Record>(&self, id: &RecordId) -> Option<R> {
        self.select_records(ID_FIELD, id).into_iter().next()
    }

    /// Merges the serialized fields of `patch` into the record with `id`.
    pub fn update_record<R: Record>(&self, id: &RecordId, patch: &impl Serialize) -> usize {
        match to_row(patch) {
            Some(patch) => self.update(R::TABLE, ID_FIELD, &id.to_value(), &patch),
            None => 0,
        }
    }

    /// Deletes the record with `id`.
    pub fn delete_record<R: Record>(&self, id: &RecordId) -> usize {
        self.delete(R::TABLE, ID_FIELD, &id.to_value())
    }

    fn persist(&self, table: &str, rows: &[Row]) {
        let raw = match serde_json::to_string(rows) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize table {}: {}", table, e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&namespaced(table), &raw) {
            tracing::warn!("Failed to write table {}: {}", table, e);
        }
    }
}

fn matches(row: &Row, column: &str, value: &Value) -> bool {
    row.get(column) == Some(value)
}

/// Shallow merge of `patch` into `row`, leaving the id alone.
fn merge(row: &mut Row, patch: Row) {
    for (field, value) in patch {
        if field != ID_FIELD {
            row.insert(field, value);
        }
    }
}

/// Whether a match key value counts as set: not null, `""`, `false` or zero.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn to_row<T: Serialize>(value: &T) -> Option<Row> {
    match serde_json::to_value(value) {
        Ok(Value::Object(row)) => Some(row),
        Ok(other) => {
            tracing::warn!("Expected a record object, got {}", other);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to serialize record: {}", e);
            None
        }
    }
}

fn from_row<R: Record>(row: Row) -> Option<R> {
    match serde_json::from_value(Value::Object(row)) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Skipping malformed {} record: {}", R::TABLE, e);
            None
        }
    }
}

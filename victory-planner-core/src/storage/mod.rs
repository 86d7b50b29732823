//! Device-local key/value storage.
//!
//! Everything the planner persists is a string value under a namespaced key:
//!
//! ```text
//! victory_planner_user_id           # bare identity string
//! victory_planner_goals             # JSON array of records
//! victory_planner_tasks
//! victory_planner_habits
//! victory_planner_journal_entries
//! victory_planner_events
//! victory_planner_notes
//! ```
//!
//! Backends implement [`KeyValueStorage`]. [`FileStorage`] keeps one file per
//! key in a data directory; [`MemoryStorage`] keeps values in a shared map.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Prefix shared by every key the planner writes.
pub const KEY_PREFIX: &str = "victory_planner_";

/// Returns `name` with the planner namespace prefix applied.
pub fn namespaced(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name)
}

/// A synchronous string key/value store.
///
/// Handles are expected to be cheap to clone, with clones sharing the same
/// underlying data.
pub trait KeyValueStorage {
    /// Reads a value. Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors that can occur in a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced() {
        assert_eq!(namespaced("tasks"), "victory_planner_tasks");
        assert_eq!(namespaced("user_id"), "victory_planner_user_id");
    }
}

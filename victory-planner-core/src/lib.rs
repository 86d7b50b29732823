//! Victory Planner Core Library
//!
//! Local data layer for Victory Planner: device identity, key/value backed
//! tables, the domain records and sync codes for moving data between devices.

pub mod identity;
pub mod models;
pub mod planner;
pub mod record_id;
pub mod storage;
pub mod store;
pub mod sync;
pub mod table;

pub use identity::{Identity, IdentityProvider};
pub use models::{
    Event, EventPatch, Goal, Habit, JournalEntry, Note, Priority, Record, Task, CATEGORIES,
    OTHER_CATEGORY,
};
pub use planner::{Planner, PlannerData, PlannerError};
pub use record_id::{RecordId, RecordIdError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{Row, TableStore};
pub use sync::{apply_snapshot, capture_snapshot, Snapshot, SnapshotError};
pub use table::Table;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

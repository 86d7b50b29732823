//! Typed records, one per domain table.
//!
//! Every record carries an `id` (assigned by the store on insert) and the
//! `user_id` of the device that created it. Field names on the wire follow the
//! web planner's camelCase names so sync codes move between the two.

mod event;
mod goal;
mod habit;
mod journal_entry;
mod note;
mod task;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::identity::Identity;
use crate::record_id::RecordId;
use crate::table::Table;

pub use event::{Event, EventPatch};
pub use goal::{Goal, CATEGORIES, OTHER_CATEGORY};
pub use habit::Habit;
pub use journal_entry::JournalEntry;
pub use note::Note;
pub use task::{Priority, Task};

/// A record stored in one of the domain tables.
pub trait Record: Serialize + DeserializeOwned {
    /// The table records of this type live in.
    const TABLE: Table;

    fn id(&self) -> &RecordId;

    fn user_id(&self) -> &Identity;
}

macro_rules! impl_record {
    ($ty:ty, $table:expr) => {
        impl Record for $ty {
            const TABLE: Table = $table;

            fn id(&self) -> &RecordId {
                &self.id
            }

            fn user_id(&self) -> &Identity {
                &self.user_id
            }
        }
    };
}

impl_record!(Goal, Table::Goals);
impl_record!(Task, Table::Tasks);
impl_record!(Habit, Table::Habits);
impl_record!(JournalEntry, Table::JournalEntries);
impl_record!(Event, Table::Events);
impl_record!(Note, Table::Notes);

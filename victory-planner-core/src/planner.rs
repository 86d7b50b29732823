//! Planner service: the user actions of the planner on top of the table store.
//!
//! Each action is one or two store calls. Records are always tagged with the
//! current identity and reads are scoped to it.

use chrono::{Local, NaiveDate, Utc};
use serde_json::json;
use thiserror::Error;

use crate::identity::{Identity, IdentityProvider};
use crate::models::{Event, EventPatch, Goal, Habit, JournalEntry, Note, Priority, Record, Task};
use crate::record_id::RecordId;
use crate::storage::KeyValueStorage;
use crate::store::TableStore;
use crate::sync::{apply_snapshot, capture_snapshot, Snapshot, SnapshotError};
use crate::table::Table;

/// Field on an event linking it to its task.
const TASK_ID_FIELD: &str = "taskId";

/// Prefix of the title of a task's calendar event.
const TASK_EVENT_PREFIX: &str = "📋 ";

/// Errors from planner actions.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Failed to store {0} record")]
    NotStored(Table),

    #[error(transparent)]
    Sync(#[from] SnapshotError),
}

/// Everything owned by the current identity, loaded in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerData {
    pub identity: Identity,
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub journal_entries: Vec<JournalEntry>,
    pub events: Vec<Event>,
    pub notes: Vec<Note>,
}

impl PlannerData {
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// `(completed, total)` tasks scheduled on `date`.
    pub fn progress_on(&self, date: NaiveDate) -> (usize, usize) {
        let tasks = self.tasks_on(date);
        let completed = tasks.iter().filter(|t| t.completed).count();
        (completed, tasks.len())
    }
}

/// The planner's data layer, owned by whoever constructs it.
#[derive(Debug, Clone)]
pub struct Planner<S> {
    identity: IdentityProvider<S>,
    store: TableStore<S>,
}

impl<S: KeyValueStorage + Clone> Planner<S> {
    /// Create a planner whose identity and tables share `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            identity: IdentityProvider::new(storage.clone()),
            store: TableStore::new(storage),
        }
    }
}

impl<S: KeyValueStorage> Planner<S> {
    /// The current identity, created on first use.
    pub fn identity(&self) -> Identity {
        self.identity.get_identity()
    }

    pub fn store(&self) -> &TableStore<S> {
        &self.store
    }

    /// Loads every table, scoped to the current identity.
    pub fn load(&self) -> PlannerData {
        let identity = self.identity();

        PlannerData {
            goals: self.store.owned_by(&identity),
            tasks: self.store.owned_by(&identity),
            habits: self.store.owned_by(&identity),
            journal_entries: self.store.owned_by(&identity),
            events: self.store.owned_by(&identity),
            notes: self.store.owned_by(&identity),
            identity,
        }
    }

    // ==================== Goals ====================

    pub fn add_goal(
        &self,
        title: &str,
        category: &str,
        custom_category: Option<String>,
        target: u32,
    ) -> Result<Goal, PlannerError> {
        require("title", title)?;
        let goal = Goal::new(self.identity(), title, category, custom_category, target);
        self.insert_one(goal)
    }

    /// Moves progress by `delta`, clamped to `0..=target`.
    pub fn adjust_goal_progress(&self, id: &RecordId, delta: i64) -> Option<Goal> {
        let goal: Goal = self.store.find(id)?;
        self.set_goal_current(id, goal.progress_by(delta))
    }

    /// Sets progress to `value`, clamped to `0..=target`.
    pub fn set_goal_progress(&self, id: &RecordId, value: i64) -> Option<Goal> {
        let goal: Goal = self.store.find(id)?;
        self.set_goal_current(id, goal.clamp_progress(value))
    }

    fn set_goal_current(&self, id: &RecordId, current: u32) -> Option<Goal> {
        self.store
            .update_record::<Goal>(id, &json!({ "current": current }));
        self.store.find(id)
    }

    pub fn delete_goal(&self, id: &RecordId) -> bool {
        self.store.delete_record::<Goal>(id) > 0
    }

    // ==================== Tasks ====================

    /// Adds a task and its all-day calendar event.
    ///
    /// `date` defaults to today.
    pub fn add_task(
        &self,
        text: &str,
        priority: Priority,
        date: Option<NaiveDate>,
    ) -> Result<(Task, Option<Event>), PlannerError> {
        require("text", text)?;
        let identity = self.identity();
        let date = date.unwrap_or_else(today);

        let task = self.insert_one(Task::new(identity.clone(), text, priority, date))?;

        let event = Event::new(identity, format!("{}{}", TASK_EVENT_PREFIX, text), date)
            .all_day()
            .for_task(task.id.clone());
        let event = self.store.insert_records(&[event]).into_iter().next();

        Ok((task, event))
    }

    pub fn toggle_task(&self, id: &RecordId) -> Option<Task> {
        let task: Task = self.store.find(id)?;
        self.store
            .update_record::<Task>(id, &json!({ "completed": !task.completed }));
        self.store.find(id)
    }

    /// Deletes a task together with its calendar event.
    pub fn delete_task(&self, id: &RecordId) -> bool {
        let deleted = self.store.delete_record::<Task>(id) > 0;
        let events = self
            .store
            .delete(Table::Events, TASK_ID_FIELD, &id.to_value());

        tracing::debug!("Deleted task {} and {} companion event(s)", id, events);
        deleted
    }

    // ==================== Habits ====================

    pub fn add_habit(&self, name: &str) -> Result<Habit, PlannerError> {
        require("name", name)?;
        self.insert_one(Habit::new(self.identity(), name))
    }

    /// Flips today's completion, moving the streak with it.
    pub fn toggle_habit(&self, id: &RecordId) -> Option<Habit> {
        let habit: Habit = self.store.find(id)?;
        let (completed_today, streak) = habit.toggled();
        self.store.update_record::<Habit>(
            id,
            &json!({ "completedToday": completed_today, "streak": streak }),
        );
        self.store.find(id)
    }

    pub fn delete_habit(&self, id: &RecordId) -> bool {
        self.store.delete_record::<Habit>(id) > 0
    }

    // ==================== Journal ====================

    pub fn add_journal_entry(&self, text: &str) -> Result<JournalEntry, PlannerError> {
        require("text", text)?;
        self.insert_one(JournalEntry::new(self.identity(), text))
    }

    pub fn delete_journal_entry(&self, id: &RecordId) -> bool {
        self.store.delete_record::<JournalEntry>(id) > 0
    }

    // ==================== Events ====================

    /// Adds an event owned by the current identity.
    pub fn add_event(&self, mut event: Event) -> Result<Event, PlannerError> {
        require("title", &event.title)?;
        event.user_id = self.identity();
        self.insert_one(event)
    }

    pub fn update_event(
        &self,
        id: &RecordId,
        patch: &EventPatch,
    ) -> Result<Option<Event>, PlannerError> {
        if let Some(title) = &patch.title {
            require("title", title)?;
        }
        self.store.update_record::<Event>(id, patch);
        Ok(self.store.find(id))
    }

    pub fn delete_event(&self, id: &RecordId) -> bool {
        self.store.delete_record::<Event>(id) > 0
    }

    // ==================== Notes ====================

    pub fn create_note(&self) -> Result<Note, PlannerError> {
        self.insert_one(Note::new(self.identity()))
    }

    /// Saves note content; the title follows the first line.
    pub fn save_note(&self, id: &RecordId, content: &str) -> Option<Note> {
        let patch = json!({
            "title": Note::title_for(content),
            "content": content,
            "date": Utc::now(),
        });
        if self.store.update_record::<Note>(id, &patch) == 0 {
            return None;
        }
        self.store.find(id)
    }

    pub fn delete_note(&self, id: &RecordId) -> bool {
        self.store.delete_record::<Note>(id) > 0
    }

    // ==================== Sync ====================

    /// Encodes the full dataset as a sync code.
    pub fn export_sync_code(&self) -> Result<String, PlannerError> {
        Ok(capture_snapshot(&self.identity, &self.store).encode()?)
    }

    /// Decodes a sync code and replaces all local data with it.
    ///
    /// Nothing is written unless the whole code decodes. Data loaded before
    /// the import is stale afterwards; call [`Planner::load`] again.
    pub fn import_sync_code(&self, code: &str) -> Result<Snapshot, PlannerError> {
        let snapshot = Snapshot::decode(code)?;
        apply_snapshot(&self.identity, &self.store, &snapshot);
        Ok(snapshot)
    }

    fn insert_one<R: Record>(&self, record: R) -> Result<R, PlannerError> {
        let stored = self
            .store
            .insert_records(&[record])
            .into_iter()
            .next()
            .ok_or(PlannerError::NotStored(R::TABLE))?;

        tracing::debug!("Added {} record {} for {}", R::TABLE, stored.id(), stored.user_id());
        Ok(stored)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), PlannerError> {
    if value.trim().is_empty() {
        return Err(PlannerError::Required(field));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

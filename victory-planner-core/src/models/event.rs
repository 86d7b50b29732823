use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Identity;
use crate::record_id::RecordId;

/// A calendar event.
///
/// Events created alongside a task set `isTask` and point back at the task
/// through `taskId`; deleting the task removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Identity,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(rename = "endTime", default)]
    pub end_time: String,
    #[serde(rename = "isAllDay", default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "isTask", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_task: bool,
    #[serde(rename = "taskId", default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<RecordId>,
}

impl Event {
    pub fn new(user_id: Identity, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: RecordId::Unassigned,
            user_id,
            title: title.into(),
            date,
            start_time: String::new(),
            end_time: String::new(),
            is_all_day: false,
            location: String::new(),
            is_task: false,
            task_id: None,
        }
    }

    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Marks this event as the calendar entry of a task.
    pub fn for_task(mut self, task_id: RecordId) -> Self {
        self.is_task = true;
        self.task_id = Some(task_id);
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.title)?;
        if self.is_all_day {
            write!(f, " (all day)")?;
        } else if !self.start_time.is_empty() {
            write!(f, " {}-{}", self.start_time, self.end_time)?;
        }
        if !self.location.is_empty() {
            write!(f, " @ {}", self.location)?;
        }
        Ok(())
    }
}

/// Editable event fields. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "isAllDay", skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_wire_names() {
        let event = Event::new(Identity::new("u"), "Standup", date())
            .with_times("09:00", "09:15")
            .with_location("Office");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["endTime"], "09:15");
        assert_eq!(value["isAllDay"], false);
        assert!(value.get("isTask").is_none());
        assert!(value.get("taskId").is_none());
    }

    #[test]
    fn test_task_event() {
        let task_id = RecordId::new();
        let event = Event::new(Identity::new("u"), "📋 Buy milk", date())
            .all_day()
            .for_task(task_id.clone());
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["isTask"], true);
        assert_eq!(value["taskId"], task_id.to_value());
    }

    #[test]
    fn test_display() {
        let event = Event::new(Identity::new("u"), "Lunch", date())
            .with_times("12:00", "13:00")
            .with_location("Cafe");
        assert_eq!(event.to_string(), "2024-03-10 Lunch 12:00-13:00 @ Cafe");
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = EventPatch {
            title: Some("Renamed".into()),
            is_all_day: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value, serde_json::json!({"title": "Renamed", "isAllDay": true}));
        assert!(!patch.is_empty());
        assert!(EventPatch::default().is_empty());
    }
}

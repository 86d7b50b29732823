use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::record_id::RecordId;

/// A daily habit with a running streak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default, skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Identity,
    pub name: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(rename = "completedToday", default)]
    pub completed_today: bool,
}

impl Habit {
    pub fn new(user_id: Identity, name: impl Into<String>) -> Self {
        Self {
            id: RecordId::Unassigned,
            user_id,
            name: name.into(),
            streak: 0,
            completed_today: false,
        }
    }

    /// Returns `(completed_today, streak)` after flipping today's completion.
    pub fn toggled(&self) -> (bool, u32) {
        if self.completed_today {
            (false, self.streak.saturating_sub(1))
        } else {
            (true, self.streak + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_streak() {
        let mut habit = Habit::new(Identity::new("u"), "Meditate");
        assert_eq!(habit.toggled(), (true, 1));

        habit.completed_today = true;
        habit.streak = 0;
        assert_eq!(habit.toggled(), (false, 0));
    }

    #[test]
    fn test_wire_name() {
        let habit = Habit::new(Identity::new("u"), "Meditate");
        let value = serde_json::to_value(&habit).unwrap();
        assert_eq!(value["completedToday"], false);
        assert_eq!(value["streak"], 0);
    }
}

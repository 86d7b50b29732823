use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Identity;
use crate::record_id::RecordId;

/// Category that asks the user for a free-form category instead.
pub const OTHER_CATEGORY: &str = "Other";

/// Categories offered when adding a goal.
pub const CATEGORIES: [&str; 9] = [
    "Health & Fitness",
    "Career",
    "Finance",
    "Personal Growth",
    "Relationships",
    "Education",
    "Creativity",
    "Travel",
    OTHER_CATEGORY,
];

fn default_target() -> u32 {
    10
}

/// A goal with numeric progress towards a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Identity,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(
        rename = "customCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_category: Option<String>,
    #[serde(default = "default_target")]
    pub target: u32,
    #[serde(default)]
    pub current: u32,
}

impl Goal {
    /// Creates a goal with no progress.
    ///
    /// When `category` is [`OTHER_CATEGORY`] the custom category becomes the
    /// stored category.
    pub fn new(
        user_id: Identity,
        title: impl Into<String>,
        category: impl Into<String>,
        custom_category: Option<String>,
        target: u32,
    ) -> Self {
        let category = category.into();
        let category = match (&custom_category, category.as_str()) {
            (Some(custom), OTHER_CATEGORY) => custom.clone(),
            _ => category,
        };

        Self {
            id: RecordId::Unassigned,
            user_id,
            title: title.into(),
            category,
            custom_category,
            target,
            current: 0,
        }
    }

    /// Progress after moving by `delta`, kept within `0..=target`.
    pub fn progress_by(&self, delta: i64) -> u32 {
        self.clamp_progress(i64::from(self.current).saturating_add(delta))
    }

    /// `value` kept within `0..=target`.
    pub fn clamp_progress(&self, value: i64) -> u32 {
        value.clamp(0, i64::from(self.target)) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.title, self.current, self.target)?;
        if !self.category.is_empty() {
            write!(f, " [{}]", self.category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_category_uses_custom() {
        let goal = Goal::new(
            Identity::new("u"),
            "Learn to sail",
            "Other",
            Some("Hobbies".into()),
            5,
        );
        assert_eq!(goal.category, "Hobbies");
        assert_eq!(goal.current, 0);
    }

    #[test]
    fn test_progress_clamped() {
        let mut goal = Goal::new(Identity::new("u"), "Run", "Health & Fitness", None, 10);
        goal.current = 9;

        assert_eq!(goal.progress_by(1), 10);
        assert_eq!(goal.progress_by(5), 10);
        assert_eq!(goal.progress_by(-20), 0);
        assert_eq!(goal.clamp_progress(-3), 0);
        assert_eq!(goal.clamp_progress(7), 7);
    }

    #[test]
    fn test_progress_extreme_deltas() {
        let mut goal = Goal::new(Identity::new("u"), "Run", "Health & Fitness", None, 5);
        goal.current = 1;

        assert_eq!(goal.progress_by(i64::MAX), 5);
        assert_eq!(goal.progress_by(i64::MIN), 0);
        assert_eq!(goal.clamp_progress(i64::MAX), 5);
    }

    #[test]
    fn test_missing_target_defaults_to_ten() {
        let goal: Goal = serde_json::from_str(r#"{"title":"Read","user_id":"u"}"#).unwrap();
        assert_eq!(goal.target, 10);
        assert_eq!(goal.current, 0);
    }
}

//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its enums and the draft used for writes.
//! - Compute the derived effective status (never stored).
//!
//! # Invariants
//! - `title` is never blank.
//! - `created_at` is set once and never changes on update.
//! - A task is overdue only when its due date is strictly before now.

use crate::model::record::{
    non_blank, validate_id, validate_title, Entity, ParseTokenError, RecordId, Timestamp,
    ValidationError,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank; higher ranks list first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTokenError::new("priority", s)),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an optional priority; unset ranks below `low`.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    priority.map_or(0, Priority::rank)
}

/// Task grouping category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Health,
    Shopping,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "health" => Ok(Self::Health),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            _ => Err(ParseTokenError::new("category", s)),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived task classification.
///
/// As a filter value, `Pending` selects every incomplete task, overdue ones
/// included; as a classification it excludes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Completed,
    Pending,
    Overdue,
}

impl EffectiveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }
}

impl FromStr for EffectiveStatus {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseTokenError::new("task status", s)),
        }
    }
}

impl Display for EffectiveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` when the stored value was absent or unrecognized.
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: Timestamp,
}

impl Task {
    /// Returns whether the task is incomplete and strictly past due.
    pub fn is_overdue<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let now = now.with_timezone(&Utc);
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Classifies the task as completed, overdue or pending.
    pub fn effective_status<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> EffectiveStatus {
        if self.completed {
            EffectiveStatus::Completed
        } else if self.is_overdue(now) {
            EffectiveStatus::Overdue
        } else {
            EffectiveStatus::Pending
        }
    }

    /// Flips completion (the complete/reopen intent).
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Copies mutable fields into a draft for edit flows.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
            completed: self.completed,
        }
    }
}

impl Entity for Task {
    type Draft = TaskDraft;

    const KIND: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        validate_title(&self.title)
    }

    fn from_draft(id: RecordId, draft: TaskDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: non_blank(draft.description),
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: now,
        }
    }

    fn apply_draft(&mut self, draft: TaskDraft, _now: Timestamp) {
        self.title = draft.title;
        self.description = non_blank(draft.description);
        self.priority = draft.priority;
        self.category = draft.category;
        self.due_date = draft.due_date;
        self.completed = draft.completed;
    }
}

/// Write payload for task create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<Timestamp>,
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft with the form defaults (`medium`, `personal`, open).
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Some(Priority::Medium),
            category: Some(Category::Personal),
            due_date: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Checks draft-level invariants before it reaches a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::{priority_rank, EffectiveStatus, Priority, Task, TaskDraft};
    use crate::model::record::Entity;
    use chrono::{Duration, TimeZone, Utc};

    fn task_due(offset_minutes: Option<i64>, completed: bool) -> Task {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let mut draft = TaskDraft::new("write report");
        draft.due_date = offset_minutes.map(|minutes| now + Duration::minutes(minutes));
        draft.completed = completed;
        Task::from_draft(1, draft, now)
    }

    #[test]
    fn priority_rank_orders_unset_lowest() {
        assert_eq!(priority_rank(None), 0);
        assert!(priority_rank(Some(Priority::Low)) < priority_rank(Some(Priority::Medium)));
        assert!(priority_rank(Some(Priority::Medium)) < priority_rank(Some(Priority::High)));
    }

    #[test]
    fn effective_status_uses_strict_due_comparison() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            task_due(Some(0), false).effective_status(&now),
            EffectiveStatus::Pending
        );
        assert_eq!(
            task_due(Some(-1), false).effective_status(&now),
            EffectiveStatus::Overdue
        );
        assert_eq!(
            task_due(Some(-1), true).effective_status(&now),
            EffectiveStatus::Completed
        );
        assert_eq!(
            task_due(None, false).effective_status(&now),
            EffectiveStatus::Pending
        );
    }

    #[test]
    fn parse_accepts_mixed_case_tokens() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority value `urgent`");
    }

    #[test]
    fn blank_description_is_stored_as_none() {
        let now = Utc::now();
        let task = Task::from_draft(3, TaskDraft::new("t").with_description("  "), now);
        assert_eq!(task.description, None);
    }
}

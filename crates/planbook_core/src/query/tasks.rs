//! Task list view derivation.
//!
//! # Invariants
//! - Output order: priority rank descending, then due date ascending with
//!   undated tasks last.
//! - Undated tasks of equal rank keep their input order.

use crate::model::record::Timestamp;
use crate::model::task::{priority_rank, Category, EffectiveStatus, Priority, Task};
use crate::query::matching::SearchNeedle;
use chrono::{DateTime, TimeZone};
use std::cmp::Ordering;

/// Task list filter. `Default` applies no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Matched against title and description, case-insensitive.
    pub search_text: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    /// `Pending` selects every incomplete task, overdue included.
    pub status: Option<EffectiveStatus>,
}

impl TaskFilter {
    /// Returns whether any constraint is set.
    pub fn is_active(&self) -> bool {
        self.search_text.as_deref().is_some_and(|text| !text.is_empty())
            || self.priority.is_some()
            || self.category.is_some()
            || self.status.is_some()
    }
}

/// Filters and orders tasks for list views.
pub fn filter_tasks<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    filter: &TaskFilter,
    now: &DateTime<Tz>,
) -> Vec<&'a Task> {
    let needle = SearchNeedle::parse(filter.search_text.as_deref());
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            needle.as_ref().map_or(true, |needle| {
                needle.matches(&task.title) || needle.matches_opt(task.description.as_deref())
            })
        })
        .filter(|task| filter.priority.map_or(true, |p| task.priority == Some(p)))
        .filter(|task| filter.category.map_or(true, |c| task.category == Some(c)))
        .filter(|task| {
            filter
                .status
                .map_or(true, |status| matches_status(task, status, now))
        })
        .collect();
    sort_tasks(&mut view);
    view
}

/// Stable sort in task list order.
pub fn sort_tasks(view: &mut [&Task]) {
    view.sort_by(|a, b| compare_tasks(a, b));
}

/// Task list ordering: higher priority first, then earlier due date.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    priority_rank(b.priority)
        .cmp(&priority_rank(a.priority))
        .then_with(|| compare_due_dates(a.due_date, b.due_date))
}

fn compare_due_dates(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn matches_status<Tz: TimeZone>(task: &Task, status: EffectiveStatus, now: &DateTime<Tz>) -> bool {
    match status {
        EffectiveStatus::Completed => task.completed,
        EffectiveStatus::Pending => !task.completed,
        EffectiveStatus::Overdue => task.is_overdue(now),
    }
}

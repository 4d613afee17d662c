//! Dashboard use-case service.
//!
//! # Responsibility
//! - Load all three collections and build an owned overview projection.
//!
//! # Invariants
//! - Read-only: never writes through any repository.

use crate::model::meeting::Meeting;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::query::dashboard::{summarize_dashboard, DashboardSummary, Greeting};
use crate::repo::record_repo::RecordRepository;
use crate::service::error::ServiceResult;
use chrono::{DateTime, TimeZone};
use log::debug;

/// Owned copy of [`DashboardSummary`], detached from source collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub greeting: Greeting,
    pub todays_tasks: Vec<Task>,
    pub recent_notes: Vec<Note>,
    pub todays_meetings: Vec<Meeting>,
    pub tasks_due_today_completed: usize,
    pub tasks_due_today_total: usize,
    pub upcoming_meeting_count: usize,
    pub total_notes: usize,
}

impl From<DashboardSummary<'_>> for DashboardView {
    fn from(summary: DashboardSummary<'_>) -> Self {
        Self {
            greeting: summary.greeting,
            todays_tasks: summary.todays_tasks.into_iter().cloned().collect(),
            recent_notes: summary.recent_notes.into_iter().cloned().collect(),
            todays_meetings: summary.todays_meetings.into_iter().cloned().collect(),
            tasks_due_today_completed: summary.tasks_due_today_completed,
            tasks_due_today_total: summary.tasks_due_today_total,
            upcoming_meeting_count: summary.upcoming_meeting_count,
            total_notes: summary.total_notes,
        }
    }
}

/// Read-only facade over the three record repositories.
pub struct DashboardService<'a, T, N, M> {
    tasks: &'a T,
    notes: &'a N,
    meetings: &'a M,
}

impl<'a, T, N, M> DashboardService<'a, T, N, M>
where
    T: RecordRepository<Task>,
    N: RecordRepository<Note>,
    M: RecordRepository<Meeting>,
{
    pub fn new(tasks: &'a T, notes: &'a N, meetings: &'a M) -> Self {
        Self {
            tasks,
            notes,
            meetings,
        }
    }

    /// Loads every collection and summarizes it as seen at `now`.
    pub fn overview<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ServiceResult<DashboardView> {
        let tasks = self.tasks.list_all()?;
        let notes = self.notes.list_all()?;
        let meetings = self.meetings.list_all()?;
        debug!(
            "event=dashboard_load module=service status=ok tasks={} notes={} meetings={}",
            tasks.len(),
            notes.len(),
            meetings.len()
        );
        Ok(summarize_dashboard(&tasks, &notes, &meetings, now).into())
    }
}

//! Dashboard projections over the three record collections.
//!
//! # Responsibility
//! - Build the read-only overview: today's tasks, recent notes, the next
//!   meetings and summary counters.
//!
//! # Invariants
//! - Projections reuse list orderings from the sibling modules.
//! - Caps are fixed; there is no pagination or cursor.
//! - Every call recomputes from scratch.

use crate::model::meeting::{Meeting, MeetingStatus};
use crate::model::note::Note;
use crate::model::task::Task;
use crate::query::matching::is_same_day;
use crate::query::meetings::{filter_meetings, DateScope, MeetingFilter};
use crate::query::notes::{filter_notes, NoteFilter};
use crate::query::tasks::sort_tasks;
use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::{Display, Formatter};

pub const TODAYS_TASKS_LIMIT: usize = 5;
pub const RECENT_NOTES_LIMIT: usize = 3;
pub const NEXT_MEETINGS_LIMIT: usize = 2;
pub const DASHBOARD_MEETINGS_LIMIT: usize = 3;

/// Time-of-day salutation for the overview header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Morning before 12:00, afternoon before 18:00, evening otherwise.
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 18 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

impl Display for Greeting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => f.write_str("Good morning"),
            Self::Afternoon => f.write_str("Good afternoon"),
            Self::Evening => f.write_str("Good evening"),
        }
    }
}

/// Overview projection borrowing from the source collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub greeting: Greeting,
    /// Due today, or undated and open; task order; at most 5.
    pub todays_tasks: Vec<&'a Task>,
    /// Most recently touched notes; at most 3.
    pub recent_notes: Vec<&'a Note>,
    /// Today's meetings followed by up to 2 later ones; at most 3.
    pub todays_meetings: Vec<&'a Meeting>,
    pub tasks_due_today_completed: usize,
    pub tasks_due_today_total: usize,
    pub upcoming_meeting_count: usize,
    pub total_notes: usize,
}

/// Builds the dashboard projection as seen at `now`.
pub fn summarize_dashboard<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    notes: &'a [Note],
    meetings: &'a [Meeting],
    now: &DateTime<Tz>,
) -> DashboardSummary<'a> {
    let (tasks_due_today_completed, tasks_due_today_total) = due_today_counts(tasks, now);

    DashboardSummary {
        greeting: Greeting::for_hour(now.hour()),
        todays_tasks: todays_tasks(tasks, now),
        recent_notes: recent_notes(notes),
        todays_meetings: todays_meetings(meetings, now),
        tasks_due_today_completed,
        tasks_due_today_total,
        upcoming_meeting_count: meetings
            .iter()
            .filter(|meeting| meeting.status == MeetingStatus::Upcoming)
            .count(),
        total_notes: notes.len(),
    }
}

/// Tasks due today plus every open undated task, in task order.
pub fn todays_tasks<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|task| match task.due_date {
            Some(due) => is_same_day(&due, now),
            None => !task.completed,
        })
        .collect();
    sort_tasks(&mut view);
    view.truncate(TODAYS_TASKS_LIMIT);
    view
}

pub fn recent_notes(notes: &[Note]) -> Vec<&Note> {
    let mut view = filter_notes(notes, &NoteFilter::default());
    view.truncate(RECENT_NOTES_LIMIT);
    view
}

/// Today's meetings, then the next future meetings on later days.
pub fn todays_meetings<'a, Tz: TimeZone>(
    meetings: &'a [Meeting],
    now: &DateTime<Tz>,
) -> Vec<&'a Meeting> {
    let chronological = filter_meetings(meetings, &MeetingFilter::default(), now);
    let today = chronological
        .iter()
        .copied()
        .filter(|meeting| DateScope::Today.contains(&meeting.datetime, now));
    let later = chronological
        .iter()
        .copied()
        .filter(|meeting| {
            !DateScope::Today.contains(&meeting.datetime, now)
                && DateScope::Upcoming.contains(&meeting.datetime, now)
        })
        .take(NEXT_MEETINGS_LIMIT);
    today.chain(later).take(DASHBOARD_MEETINGS_LIMIT).collect()
}

/// `(completed, total)` over tasks whose due date is today.
fn due_today_counts<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> (usize, usize) {
    tasks
        .iter()
        .filter(|task| task.due_date.is_some_and(|due| is_same_day(&due, now)))
        .fold((0, 0), |(completed, total), task| {
            (completed + usize::from(task.completed), total + 1)
        })
}

#[cfg(test)]
mod tests {
    use super::Greeting;

    #[test]
    fn greeting_boundaries() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(18), Greeting::Evening);
        assert_eq!(Greeting::Evening.to_string(), "Good evening");
    }
}

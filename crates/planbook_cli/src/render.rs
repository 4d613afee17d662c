//! Plain-text rendering of records and the dashboard.

use chrono::{DateTime, FixedOffset};
use planbook_core::{DashboardView, Meeting, Note, Task, Timestamp};
use std::fmt::Write;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn stamp(value: &Timestamp, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format(STAMP_FORMAT).to_string()
}

pub fn task_line(task: &Task, now: &DateTime<FixedOffset>) -> String {
    let mark = if task.completed { "x" } else { " " };
    let priority = task.priority.map_or("-", |p| p.as_str());
    let category = task.category.map_or("-", |c| c.as_str());
    let due = task
        .due_date
        .as_ref()
        .map_or_else(|| "no due date".to_string(), |due| stamp(due, now.offset()));
    format!(
        "[{mark}] #{} {} ({priority}/{category}) {due} {}",
        task.id,
        task.title,
        task.effective_status(now)
    )
}

pub fn note_line(note: &Note) -> String {
    let mut line = format!("#{} {}", note.id, note.title);
    if !note.tags.is_empty() {
        let _ = write!(line, " [{}]", note.tags.join(", "));
    }
    line
}

pub fn meeting_line(meeting: &Meeting, offset: &FixedOffset) -> String {
    format!(
        "#{} {} {} {}m {}",
        meeting.id,
        stamp(&meeting.datetime, offset),
        meeting.title,
        meeting.duration,
        meeting.status
    )
}

pub fn dashboard(view: &DashboardView, now: &DateTime<FixedOffset>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}!", view.greeting);
    let _ = writeln!(
        out,
        "due today: {}/{} done | upcoming meetings: {} | notes: {}",
        view.tasks_due_today_completed,
        view.tasks_due_today_total,
        view.upcoming_meeting_count,
        view.total_notes
    );

    let _ = writeln!(out, "\nToday's tasks");
    for task in &view.todays_tasks {
        let _ = writeln!(out, "  {}", task_line(task, now));
    }
    let _ = writeln!(out, "\nRecent notes");
    for note in &view.recent_notes {
        let _ = writeln!(out, "  {}", note_line(note));
    }
    let _ = writeln!(out, "\nMeetings");
    for meeting in &view.todays_meetings {
        let _ = writeln!(out, "  {}", meeting_line(meeting, now.offset()));
    }
    out
}

//! Hosted record API row codec.
//!
//! # Responsibility
//! - Mirror the hosted API's row shape (`Id`, `Name`, `*_c` fields).
//! - Resolve every fallback exactly once while decoding, so the rest of
//!   core only sees typed records.
//!
//! # Invariants
//! - Comma-joined list fields exist only in this module.
//! - Unknown priority/category tokens decode to unset; unknown meeting
//!   status tokens are rejected.
//! - Required values (title, note content, meeting datetime) have no
//!   blank fallback; a row missing one fails with its id.
//! - List fields are normalized the same way drafts are.
//! - Decoding does not validate records; stores validate on entry.

use crate::model::meeting::{
    normalize_participants, Meeting, MeetingStatus, DEFAULT_MEETING_DURATION_MINUTES,
};
use crate::model::note::{normalize_tags, Note};
use crate::model::record::{RecordId, Timestamp};
use crate::model::task::{Category, Priority, Task};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static LIST_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid list separator regex"));

const LIST_JOINER: &str = ",";

/// Row decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Required field and all its fallbacks are absent.
    MissingField { id: RecordId, field: &'static str },
    /// Date-time text could not be parsed.
    InvalidTimestamp {
        id: RecordId,
        field: &'static str,
        value: String,
    },
    /// Enum token is not recognized where no fallback exists.
    InvalidValue {
        id: RecordId,
        field: &'static str,
        value: String,
    },
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { id, field } => write!(f, "row {id}: missing field `{field}`"),
            Self::InvalidTimestamp { id, field, value } => {
                write!(f, "row {id}: invalid timestamp `{value}` in `{field}`")
            }
            Self::InvalidValue { id, field, value } => {
                write!(f, "row {id}: invalid value `{value}` in `{field}`")
            }
        }
    }
}

impl Error for WireError {}

pub type WireResult<T> = Result<T, WireError>;

/// List field sent either comma-joined or as an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Joined(String),
    Items(Vec<String>),
}

impl ListField {
    /// Splits into trimmed, non-blank items.
    pub fn into_items(self) -> Vec<String> {
        match self {
            Self::Joined(text) => LIST_SEPARATOR_RE
                .split(text.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Self::Items(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    /// Comma-joined form used when writing rows.
    pub fn joined(items: &[String]) -> Self {
        Self::Joined(items.join(LIST_JOINER))
    }
}

/// Task row as exchanged with the hosted API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "title_c", default)]
    pub title: Option<String>,
    #[serde(rename = "description_c", default)]
    pub description: Option<String>,
    #[serde(rename = "completed_c", default)]
    pub completed: Option<bool>,
    #[serde(rename = "priority_c", default)]
    pub priority: Option<String>,
    #[serde(rename = "category_c", default)]
    pub category: Option<String>,
    #[serde(rename = "due_date_c", default)]
    pub due_date: Option<String>,
    #[serde(rename = "created_at_c", default)]
    pub created_at: Option<String>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// Note row as exchanged with the hosted API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "title_c", default)]
    pub title: Option<String>,
    #[serde(rename = "content_c", default)]
    pub content: Option<String>,
    #[serde(rename = "tags_c", default)]
    pub tags: Option<ListField>,
    #[serde(rename = "created_at_c", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at_c", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(rename = "ModifiedOn", default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

/// Meeting row as exchanged with the hosted API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRow {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "title_c", default)]
    pub title: Option<String>,
    #[serde(rename = "datetime_c", default)]
    pub datetime: Option<String>,
    #[serde(rename = "duration_c", default)]
    pub duration: Option<u32>,
    #[serde(rename = "participants_c", default)]
    pub participants: Option<ListField>,
    #[serde(rename = "agenda_c", default)]
    pub agenda: Option<String>,
    #[serde(rename = "status_c", default)]
    pub status: Option<String>,
    #[serde(rename = "created_at_c", default)]
    pub created_at: Option<String>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = WireError;

    fn try_from(row: TaskRow) -> WireResult<Self> {
        let id = row.id;
        Ok(Self {
            id,
            title: resolve_title(id, row.title, row.name)?,
            description: present(row.description),
            priority: decode_lenient(id, "priority_c", row.priority, Priority::Medium),
            category: decode_lenient(id, "category_c", row.category, Category::Personal),
            due_date: present(row.due_date)
                .map(|value| parse_timestamp(id, "due_date_c", &value))
                .transpose()?,
            completed: row.completed.unwrap_or(false),
            created_at: resolve_timestamp(id, "created_at_c", row.created_at, row.created_on)?,
        })
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            name: Some(task.title.clone()),
            title: Some(task.title.clone()),
            description: Some(task.description.clone().unwrap_or_default()),
            completed: Some(task.completed),
            priority: task.priority.map(|p| p.as_str().to_string()),
            category: task.category.map(|c| c.as_str().to_string()),
            due_date: task.due_date.as_ref().map(format_timestamp),
            created_at: Some(format_timestamp(&task.created_at)),
            created_on: None,
        }
    }
}

impl TryFrom<NoteRow> for Note {
    type Error = WireError;

    fn try_from(row: NoteRow) -> WireResult<Self> {
        let id = row.id;
        let tags = row.tags.map(ListField::into_items).unwrap_or_default();
        let content = present(row.content).ok_or(WireError::MissingField {
            id,
            field: "content_c",
        })?;
        let updated_at = present(row.updated_at)
            .or_else(|| present(row.modified_on))
            .map(|value| parse_timestamp(id, "updated_at_c", &value))
            .transpose()?;
        Ok(Self {
            id,
            title: resolve_title(id, row.title, row.name)?,
            content,
            tags: normalize_tags(&tags),
            created_at: resolve_timestamp(id, "created_at_c", row.created_at, row.created_on)?,
            updated_at,
        })
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            name: Some(note.title.clone()),
            title: Some(note.title.clone()),
            content: Some(note.content.clone()),
            tags: Some(ListField::joined(&note.tags)),
            created_at: Some(format_timestamp(&note.created_at)),
            updated_at: note.updated_at.as_ref().map(format_timestamp),
            created_on: None,
            modified_on: None,
        }
    }
}

impl TryFrom<MeetingRow> for Meeting {
    type Error = WireError;

    fn try_from(row: MeetingRow) -> WireResult<Self> {
        let id = row.id;
        let datetime = present(row.datetime).ok_or(WireError::MissingField {
            id,
            field: "datetime_c",
        })?;
        let participants = row
            .participants
            .map(ListField::into_items)
            .unwrap_or_default();
        let status = match present(row.status) {
            None => MeetingStatus::default(),
            Some(value) => value
                .parse::<MeetingStatus>()
                .map_err(|_| WireError::InvalidValue {
                    id,
                    field: "status_c",
                    value,
                })?,
        };
        Ok(Self {
            id,
            title: resolve_title(id, row.title, row.name)?,
            datetime: parse_timestamp(id, "datetime_c", &datetime)?,
            duration: row
                .duration
                .filter(|minutes| *minutes > 0)
                .unwrap_or(DEFAULT_MEETING_DURATION_MINUTES),
            participants: normalize_participants(&participants),
            agenda: present(row.agenda),
            status,
            created_at: resolve_timestamp(id, "created_at_c", row.created_at, row.created_on)?,
        })
    }
}

impl From<&Meeting> for MeetingRow {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: meeting.id,
            name: Some(meeting.title.clone()),
            title: Some(meeting.title.clone()),
            datetime: Some(format_timestamp(&meeting.datetime)),
            duration: Some(meeting.duration),
            participants: Some(ListField::joined(&meeting.participants)),
            agenda: Some(meeting.agenda.clone().unwrap_or_default()),
            status: Some(meeting.status.as_str().to_string()),
            created_at: Some(format_timestamp(&meeting.created_at)),
            created_on: None,
        }
    }
}

/// Full export of the three collections in row form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSnapshot {
    #[serde(default)]
    pub tasks: Vec<TaskRow>,
    #[serde(default)]
    pub notes: Vec<NoteRow>,
    #[serde(default)]
    pub meetings: Vec<MeetingRow>,
}

/// Typed collections decoded from a [`WireSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub meetings: Vec<Meeting>,
}

impl WireSnapshot {
    /// Decodes every row; fails on the first undecodable row.
    pub fn decode(self) -> WireResult<DecodedSnapshot> {
        Ok(DecodedSnapshot {
            tasks: self
                .tasks
                .into_iter()
                .map(Task::try_from)
                .collect::<WireResult<_>>()?,
            notes: self
                .notes
                .into_iter()
                .map(Note::try_from)
                .collect::<WireResult<_>>()?,
            meetings: self
                .meetings
                .into_iter()
                .map(Meeting::try_from)
                .collect::<WireResult<_>>()?,
        })
    }
}

/// Parses RFC 3339 instants, naive `YYYY-MM-DDTHH:MM[:SS]` (as UTC) and
/// bare `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_timestamp(id: RecordId, field: &'static str, value: &str) -> WireResult<Timestamp> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| WireError::InvalidTimestamp {
            id,
            field,
            value: value.to_string(),
        })
}

fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Treats blank text as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn resolve_title(id: RecordId, title: Option<String>, name: Option<String>) -> WireResult<String> {
    present(title)
        .or_else(|| present(name))
        .ok_or(WireError::MissingField { id, field: "title_c" })
}

fn resolve_timestamp(
    id: RecordId,
    field: &'static str,
    primary: Option<String>,
    fallback: Option<String>,
) -> WireResult<Timestamp> {
    let value = present(primary)
        .or_else(|| present(fallback))
        .ok_or(WireError::MissingField { id, field })?;
    parse_timestamp(id, field, &value)
}

/// Absent or blank → `default`; unrecognized → unset.
fn decode_lenient<T>(
    id: RecordId,
    field: &'static str,
    value: Option<String>,
    default: T,
) -> Option<T>
where
    T: std::str::FromStr,
{
    match present(value) {
        None => Some(default),
        Some(text) => match text.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                debug!(
                    "event=wire_decode module=repo status=degraded field={} id={}",
                    field, id
                );
                None
            }
        },
    }
}

//! Meeting domain model.
//!
//! # Responsibility
//! - Define the meeting record, its status enum and write draft.
//!
//! # Invariants
//! - `title` is never blank and `duration` is at least one minute.
//! - Participants are trimmed, non-blank and unique, in insertion order.

use crate::model::record::{
    non_blank, validate_id, validate_title, Entity, ParseTokenError, RecordId, Timestamp,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Duration applied when none is provided.
pub const DEFAULT_MEETING_DURATION_MINUTES: u32 = 60;

/// Meeting lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for MeetingStatus {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTokenError::new("meeting status", s)),
        }
    }
}

impl Display for MeetingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meeting record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: RecordId,
    pub title: String,
    pub datetime: Timestamp,
    /// Length in minutes.
    pub duration: u32,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub status: MeetingStatus,
    pub created_at: Timestamp,
}

impl Meeting {
    /// Copies mutable fields into a draft for edit flows.
    pub fn to_draft(&self) -> MeetingDraft {
        MeetingDraft {
            title: self.title.clone(),
            datetime: self.datetime,
            duration: self.duration,
            participants: self.participants.clone(),
            agenda: self.agenda.clone(),
            status: self.status,
        }
    }
}

impl Entity for Meeting {
    type Draft = MeetingDraft;

    const KIND: &'static str = "meeting";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        validate_title(&self.title)?;
        validate_duration(self.duration)?;
        let mut seen = HashSet::new();
        for participant in &self.participants {
            let participant = participant.trim();
            if participant.is_empty() {
                return Err(ValidationError::BlankParticipant);
            }
            if !seen.insert(participant) {
                return Err(ValidationError::DuplicateParticipant);
            }
        }
        Ok(())
    }

    fn from_draft(id: RecordId, draft: MeetingDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            datetime: draft.datetime,
            duration: draft.duration,
            participants: normalize_participants(&draft.participants),
            agenda: non_blank(draft.agenda),
            status: draft.status,
            created_at: now,
        }
    }

    fn apply_draft(&mut self, draft: MeetingDraft, _now: Timestamp) {
        self.title = draft.title;
        self.datetime = draft.datetime;
        self.duration = draft.duration;
        self.participants = normalize_participants(&draft.participants);
        self.agenda = non_blank(draft.agenda);
        self.status = draft.status;
    }
}

/// Write payload for meeting create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDraft {
    pub title: String,
    pub datetime: Timestamp,
    pub duration: u32,
    pub participants: Vec<String>,
    pub agenda: Option<String>,
    pub status: MeetingStatus,
}

impl MeetingDraft {
    /// Creates an upcoming one-hour meeting draft.
    pub fn new(title: impl Into<String>, datetime: Timestamp) -> Self {
        Self {
            title: title.into(),
            datetime,
            duration: DEFAULT_MEETING_DURATION_MINUTES,
            participants: Vec::new(),
            agenda: None,
            status: MeetingStatus::Upcoming,
        }
    }

    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda = Some(agenda.into());
        self
    }

    pub fn with_status(mut self, status: MeetingStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds one trimmed participant.
    ///
    /// Returns `Ok(false)` when the participant is already listed.
    ///
    /// # Errors
    /// - `BlankParticipant` when the input is blank after trim.
    pub fn add_participant(&mut self, raw: &str) -> Result<bool, ValidationError> {
        let participant = raw.trim();
        if participant.is_empty() {
            return Err(ValidationError::BlankParticipant);
        }
        if self.participants.iter().any(|p| p == participant) {
            return Ok(false);
        }
        self.participants.push(participant.to_string());
        Ok(true)
    }

    /// Removes one participant; returns whether it was listed.
    pub fn remove_participant(&mut self, participant: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != participant);
        self.participants.len() != before
    }

    /// Checks draft-level invariants before it reaches a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_duration(self.duration)
    }
}

/// Trims and deduplicates participants, dropping blanks.
pub fn normalize_participants(participants: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    participants
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.to_string()))
        .map(str::to_string)
        .collect()
}

fn validate_duration(duration: u32) -> Result<(), ValidationError> {
    if duration == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_participants, Meeting, MeetingDraft, MeetingStatus};
    use crate::model::record::{Entity, ValidationError};
    use chrono::Utc;

    #[test]
    fn status_uses_kebab_case_tokens() {
        assert_eq!(
            "in-progress".parse::<MeetingStatus>().unwrap(),
            MeetingStatus::InProgress
        );
        assert_eq!(MeetingStatus::InProgress.to_string(), "in-progress");
        assert!("in_progress".parse::<MeetingStatus>().is_err());
    }

    #[test]
    fn participants_are_trimmed_and_deduplicated() {
        let raw = vec![
            " ana ".to_string(),
            "bo".to_string(),
            "ana".to_string(),
            " ".to_string(),
        ];
        assert_eq!(normalize_participants(&raw), vec!["ana", "bo"]);
    }

    #[test]
    fn draft_rejects_zero_duration() {
        let mut draft = MeetingDraft::new("sync", Utc::now());
        assert_eq!(draft.add_participant("ana"), Ok(true));
        assert_eq!(draft.add_participant(" ana "), Ok(false));
        draft.duration = 0;
        assert_eq!(draft.validate(), Err(ValidationError::ZeroDuration));
    }

    #[test]
    fn record_rejects_repeated_participant() {
        let now = Utc::now();
        let mut meeting = Meeting::from_draft(1, MeetingDraft::new("sync", now), now);
        meeting.participants = vec!["ana".to_string(), " ana".to_string()];
        assert_eq!(meeting.validate(), Err(ValidationError::DuplicateParticipant));

        meeting.participants = vec!["ana".to_string(), "bo".to_string()];
        assert_eq!(meeting.validate(), Ok(()));
    }
}

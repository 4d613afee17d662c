//! Shared record identity, validation and storage contracts.
//!
//! # Responsibility
//! - Define the identity type shared by every record kind.
//! - Provide the `Entity` contract used by generic repositories.
//!
//! # Invariants
//! - `RecordId` values are strictly positive once assigned.
//! - `Entity::from_draft` never validates; callers validate before storing.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by a data store at creation time.
pub type RecordId = i64;

/// Instant type used for every stored date-time field.
pub type Timestamp = DateTime<Utc>;

/// Validation failure for record and draft payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record id is zero or negative.
    InvalidId(RecordId),
    /// Title is blank after trim.
    EmptyTitle,
    /// Note content is blank after trim.
    EmptyContent,
    /// Tag input is blank after trim.
    BlankTag,
    /// Participant input is blank after trim.
    BlankParticipant,
    /// Participant appears more than once on one meeting.
    DuplicateParticipant,
    /// Meeting duration must be at least one minute.
    ZeroDuration,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "record id must be positive, got {id}"),
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::EmptyContent => write!(f, "content must not be blank"),
            Self::BlankTag => write!(f, "tag must not be blank"),
            Self::BlankParticipant => write!(f, "participant must not be blank"),
            Self::DuplicateParticipant => write!(f, "participant is listed more than once"),
            Self::ZeroDuration => write!(f, "duration must be at least one minute"),
        }
    }
}

impl Error for ValidationError {}

/// Unknown token while parsing one of the model enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// Enum family being parsed (`priority`, `category`, ...).
    pub kind: &'static str,
    /// Raw rejected input.
    pub value: String,
}

impl ParseTokenError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for ParseTokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} value `{}`", self.kind, self.value)
    }
}

impl Error for ParseTokenError {}

/// Contract shared by every storable record kind.
///
/// A draft is the "record without id" shape accepted by `create`/`update`.
pub trait Entity: Clone {
    /// Record-without-id payload.
    type Draft: Clone;

    /// Short kind name used in log events and errors.
    const KIND: &'static str;

    /// Returns the stable record id.
    fn id(&self) -> RecordId;

    /// Checks record-level invariants.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Builds a new record from a draft with an assigned id.
    fn from_draft(id: RecordId, draft: Self::Draft, now: Timestamp) -> Self;

    /// Replaces mutable fields from a draft, preserving identity and
    /// creation time.
    fn apply_draft(&mut self, draft: Self::Draft, now: Timestamp);
}

pub(crate) fn validate_id(id: RecordId) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::InvalidId(id));
    }
    Ok(())
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Maps blank optional text to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its write draft.
//! - Normalize tag tokens (trim, lowercase, dedupe).
//!
//! # Invariants
//! - `title` and `content` are never blank.
//! - Tags are lowercase, non-blank and unique; display order follows
//!   insertion order.
//! - `updated_at` is bumped on every update through a store.

use crate::model::record::{
    validate_id, validate_title, Entity, RecordId, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Note {
    /// Most recent touch time: `updated_at`, falling back to `created_at`.
    pub fn last_touched(&self) -> Timestamp {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Exact tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Copies mutable fields into a draft for edit flows.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl Entity for Note {
    type Draft = NoteDraft;

    const KIND: &'static str = "note";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ValidationError::BlankTag);
        }
        Ok(())
    }

    fn from_draft(id: RecordId, draft: NoteDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            tags: normalize_tags(&draft.tags),
            created_at: now,
            updated_at: Some(now),
        }
    }

    fn apply_draft(&mut self, draft: NoteDraft, now: Timestamp) {
        self.title = draft.title;
        self.content = draft.content;
        self.tags = normalize_tags(&draft.tags);
        self.updated_at = Some(now);
    }
}

/// Write payload for note create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Adds one normalized tag.
    ///
    /// Returns `Ok(false)` when the tag is already present.
    ///
    /// # Errors
    /// - `BlankTag` when the input is blank after trim.
    pub fn add_tag(&mut self, raw: &str) -> Result<bool, ValidationError> {
        let tag = normalize_tag(raw).ok_or(ValidationError::BlankTag)?;
        if self.tags.contains(&tag) {
            return Ok(false);
        }
        self.tags.push(tag);
        Ok(true)
    }

    /// Removes one tag; returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|value| value != tag);
        self.tags.len() != before
    }

    /// Checks draft-level invariants before it reaches a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

/// Normalizes one tag value: trimmed and lowercase, `None` when blank.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tags, keeping first-insertion order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter_map(|tag| normalize_tag(tag))
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

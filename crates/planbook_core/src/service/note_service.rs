//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/save/delete/list APIs.
//! - Add and remove single tags with normalization.
//! - Expose the tag index used by tag pickers.
//!
//! # Invariants
//! - Note list is always sorted by last touch time, newest first.
//! - Tag names are normalized to lowercase and deduplicated.

use crate::model::note::{Note, NoteDraft};
use crate::model::record::RecordId;
use crate::query::notes::{all_tags, filter_notes, NoteFilter};
use crate::repo::record_repo::RecordRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

/// Note service facade over repository implementations.
pub struct NoteService<R: RecordRepository<Note>> {
    repo: R,
}

impl<R: RecordRepository<Note>> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn get_note(&self, id: RecordId) -> ServiceResult<Option<Note>> {
        Ok(self.repo.get(id)?)
    }

    /// Lists notes matching `filter`, most recently touched first.
    pub fn list_notes(&self, filter: &NoteFilter) -> ServiceResult<Vec<Note>> {
        let notes = self.repo.list_all()?;
        Ok(filter_notes(&notes, filter).into_iter().cloned().collect())
    }

    /// Lists every tag in use, sorted by name.
    pub fn list_tags(&self) -> ServiceResult<Vec<String>> {
        Ok(all_tags(&self.repo.list_all()?))
    }

    pub fn create_note(&mut self, draft: NoteDraft) -> ServiceResult<Note> {
        draft.validate()?;
        let note = self.repo.create(draft)?;
        info!(
            "event=note_create module=service status=ok id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Replaces note fields fully; bumps `updated_at`.
    pub fn update_note(&mut self, id: RecordId, draft: NoteDraft) -> ServiceResult<Note> {
        draft.validate()?;
        let note = self.repo.update(id, draft)?;
        info!("event=note_update module=service status=ok id={}", id);
        Ok(note)
    }

    /// Form-submit semantics: update an existing id, otherwise create.
    pub fn save_note(&mut self, id: Option<RecordId>, draft: NoteDraft) -> ServiceResult<Note> {
        match id {
            Some(id) if self.repo.get(id)?.is_some() => self.update_note(id, draft),
            _ => self.create_note(draft),
        }
    }

    /// Adds one tag; a no-op write is skipped when it is already present.
    pub fn add_tag(&mut self, id: RecordId, tag: &str) -> ServiceResult<Note> {
        let note = self.require(id)?;
        let mut draft = note.to_draft();
        if !draft.add_tag(tag)? {
            return Ok(note);
        }
        self.update_note(id, draft)
    }

    /// Removes one tag; unchanged when the tag is absent.
    pub fn remove_tag(&mut self, id: RecordId, tag: &str) -> ServiceResult<Note> {
        let note = self.require(id)?;
        let mut draft = note.to_draft();
        if !draft.remove_tag(tag) {
            return Ok(note);
        }
        self.update_note(id, draft)
    }

    pub fn delete_note(&mut self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=note_delete module=service status=ok id={}", id);
        Ok(())
    }

    fn require(&self, id: RecordId) -> ServiceResult<Note> {
        self.repo
            .get(id)?
            .ok_or(ServiceError::NotFound { kind: "note", id })
    }
}

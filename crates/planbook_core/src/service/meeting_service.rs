//! Meeting use-case service.
//!
//! # Responsibility
//! - Provide meeting create/update/save/delete/list APIs.
//! - Manage participants and status transitions on stored meetings.

use crate::model::meeting::{Meeting, MeetingDraft, MeetingStatus};
use crate::model::record::RecordId;
use crate::query::meetings::{filter_meetings, MeetingFilter};
use crate::repo::record_repo::RecordRepository;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::{DateTime, TimeZone};
use log::info;

/// Meeting service facade over repository implementations.
pub struct MeetingService<R: RecordRepository<Meeting>> {
    repo: R,
}

impl<R: RecordRepository<Meeting>> MeetingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn get_meeting(&self, id: RecordId) -> ServiceResult<Option<Meeting>> {
        Ok(self.repo.get(id)?)
    }

    /// Lists meetings matching `filter`, earliest first.
    pub fn list_meetings<Tz: TimeZone>(
        &self,
        filter: &MeetingFilter,
        now: &DateTime<Tz>,
    ) -> ServiceResult<Vec<Meeting>> {
        let meetings = self.repo.list_all()?;
        Ok(filter_meetings(&meetings, filter, now)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn create_meeting(&mut self, draft: MeetingDraft) -> ServiceResult<Meeting> {
        draft.validate()?;
        let meeting = self.repo.create(draft)?;
        info!(
            "event=meeting_create module=service status=ok id={} participant_count={}",
            meeting.id,
            meeting.participants.len()
        );
        Ok(meeting)
    }

    pub fn update_meeting(&mut self, id: RecordId, draft: MeetingDraft) -> ServiceResult<Meeting> {
        draft.validate()?;
        let meeting = self.repo.update(id, draft)?;
        info!("event=meeting_update module=service status=ok id={}", id);
        Ok(meeting)
    }

    /// Form-submit semantics: update an existing id, otherwise create.
    pub fn save_meeting(
        &mut self,
        id: Option<RecordId>,
        draft: MeetingDraft,
    ) -> ServiceResult<Meeting> {
        match id {
            Some(id) if self.repo.get(id)?.is_some() => self.update_meeting(id, draft),
            _ => self.create_meeting(draft),
        }
    }

    pub fn add_participant(&mut self, id: RecordId, participant: &str) -> ServiceResult<Meeting> {
        let meeting = self.require(id)?;
        let mut draft = meeting.to_draft();
        if !draft.add_participant(participant)? {
            return Ok(meeting);
        }
        self.update_meeting(id, draft)
    }

    pub fn remove_participant(
        &mut self,
        id: RecordId,
        participant: &str,
    ) -> ServiceResult<Meeting> {
        let meeting = self.require(id)?;
        let mut draft = meeting.to_draft();
        if !draft.remove_participant(participant) {
            return Ok(meeting);
        }
        self.update_meeting(id, draft)
    }

    pub fn set_status(&mut self, id: RecordId, status: MeetingStatus) -> ServiceResult<Meeting> {
        let meeting = self.require(id)?;
        if meeting.status == status {
            return Ok(meeting);
        }
        let updated = self.update_meeting(id, meeting.to_draft().with_status(status))?;
        info!(
            "event=meeting_status module=service status=ok id={} meeting_status={}",
            id, status
        );
        Ok(updated)
    }

    pub fn delete_meeting(&mut self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=meeting_delete module=service status=ok id={}", id);
        Ok(())
    }

    fn require(&self, id: RecordId) -> ServiceResult<Meeting> {
        self.repo
            .get(id)?
            .ok_or(ServiceError::NotFound { kind: "meeting", id })
    }
}

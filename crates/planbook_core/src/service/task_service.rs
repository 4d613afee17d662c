//! Task use-case service.
//!
//! # Responsibility
//! - Provide task create/update/save/toggle/delete/list APIs.
//! - Derive filtered task views through the query engine.
//!
//! # Invariants
//! - Drafts are validated before they reach the repository.
//! - `save_task` updates when the id exists and creates otherwise.

use crate::model::record::RecordId;
use crate::model::task::{Task, TaskDraft};
use crate::query::tasks::{filter_tasks, TaskFilter};
use crate::repo::record_repo::RecordRepository;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::{DateTime, TimeZone};
use log::info;

/// Task service facade over repository implementations.
pub struct TaskService<R: RecordRepository<Task>> {
    repo: R,
}

impl<R: RecordRepository<Task>> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the wrapped repository.
    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn get_task(&self, id: RecordId) -> ServiceResult<Option<Task>> {
        Ok(self.repo.get(id)?)
    }

    /// Lists tasks matching `filter` in task list order.
    pub fn list_tasks<Tz: TimeZone>(
        &self,
        filter: &TaskFilter,
        now: &DateTime<Tz>,
    ) -> ServiceResult<Vec<Task>> {
        let tasks = self.repo.list_all()?;
        Ok(filter_tasks(&tasks, filter, now)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> ServiceResult<Task> {
        draft.validate()?;
        let task = self.repo.create(draft)?;
        info!("event=task_create module=service status=ok id={}", task.id);
        Ok(task)
    }

    pub fn update_task(&mut self, id: RecordId, draft: TaskDraft) -> ServiceResult<Task> {
        draft.validate()?;
        let task = self.repo.update(id, draft)?;
        info!("event=task_update module=service status=ok id={}", id);
        Ok(task)
    }

    /// Form-submit semantics: update an existing id, otherwise create.
    pub fn save_task(&mut self, id: Option<RecordId>, draft: TaskDraft) -> ServiceResult<Task> {
        match id {
            Some(id) if self.repo.get(id)?.is_some() => self.update_task(id, draft),
            _ => self.create_task(draft),
        }
    }

    /// Flips completion and persists it (complete/reopen).
    pub fn toggle_task(&mut self, id: RecordId) -> ServiceResult<Task> {
        let mut task = self.require(id)?;
        task.toggle_completed();
        let updated = self.repo.update(id, task.to_draft())?;
        info!(
            "event=task_toggle module=service status=ok id={} completed={}",
            id, updated.completed
        );
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=task_delete module=service status=ok id={}", id);
        Ok(())
    }

    fn require(&self, id: RecordId) -> ServiceResult<Task> {
        self.repo
            .get(id)?
            .ok_or(ServiceError::NotFound { kind: "task", id })
    }
}

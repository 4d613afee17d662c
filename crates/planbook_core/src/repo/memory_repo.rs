//! In-memory record repository.
//!
//! # Responsibility
//! - Own one collection of records and implement `RecordRepository` on it.
//! - Expose a version counter so callers can detect stale derived views.
//!
//! # Invariants
//! - Ids are allocated from a monotonic counter that starts above every
//!   seeded id; deleted ids are never handed out again.
//! - `version` increases by one on every successful mutation and never on
//!   failures.
//! - Storage order is insertion order; updates keep a record's position.

use crate::model::record::{Entity, RecordId, Timestamp};
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
use chrono::Utc;
use log::{debug, warn};
use std::collections::HashSet;

/// Source of "now" used to stamp `created_at` / `updated_at`.
pub type Clock = fn() -> Timestamp;

/// Owned, versioned collection of one record kind.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<E: Entity> {
    records: Vec<E>,
    next_id: RecordId,
    version: u64,
    clock: Clock,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates an empty repository stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty repository with a caller-provided clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            version: 0,
            clock,
        }
    }

    /// Seeds a repository from already-identified records.
    ///
    /// # Errors
    /// - `Validation` when any record violates its invariants.
    /// - `DuplicateId` when two records share an id.
    /// - `IdExhausted` when the largest id leaves no room for new ones.
    pub fn from_records(records: Vec<E>) -> RepoResult<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id()) {
                return Err(RepoError::DuplicateId {
                    kind: E::KIND,
                    id: record.id(),
                });
            }
        }
        let max_id = records.iter().map(E::id).max().unwrap_or(0);
        let next_id = max_id.checked_add(1).ok_or(RepoError::IdExhausted)?;
        debug!(
            "event=repo_seed module=repo kind={} status=ok count={} next_id={}",
            E::KIND,
            records.len(),
            next_id
        );
        Ok(Self {
            records,
            next_id,
            version: 0,
            clock: Utc::now,
        })
    }

    /// Replaces the clock, keeping stored records.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Borrow of the current collection for query derivation.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn not_found(id: RecordId) -> RepoError {
        warn!(
            "event=repo_lookup module=repo kind={} status=error error_code=not_found id={}",
            E::KIND,
            id
        );
        RepoError::NotFound { kind: E::KIND, id }
    }
}

impl<E: Entity> RecordRepository<E> for InMemoryRepository<E> {
    fn list_all(&self) -> RepoResult<Vec<E>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<E>> {
        Ok(self.position(id).map(|index| self.records[index].clone()))
    }

    fn create(&mut self, draft: E::Draft) -> RepoResult<E> {
        let id = self.next_id;
        let following = id.checked_add(1).ok_or(RepoError::IdExhausted)?;
        let record = E::from_draft(id, draft, (self.clock)());
        record.validate()?;

        self.next_id = following;
        self.records.push(record.clone());
        self.version += 1;
        debug!(
            "event=repo_create module=repo kind={} status=ok id={} version={}",
            E::KIND,
            id,
            self.version
        );
        Ok(record)
    }

    fn update(&mut self, id: RecordId, draft: E::Draft) -> RepoResult<E> {
        let index = self.position(id).ok_or_else(|| Self::not_found(id))?;
        let mut candidate = self.records[index].clone();
        candidate.apply_draft(draft, (self.clock)());
        candidate.validate()?;

        self.records[index] = candidate.clone();
        self.version += 1;
        debug!(
            "event=repo_update module=repo kind={} status=ok id={} version={}",
            E::KIND,
            id,
            self.version
        );
        Ok(candidate)
    }

    fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let index = self.position(id).ok_or_else(|| Self::not_found(id))?;
        self.records.remove(index);
        self.version += 1;
        debug!(
            "event=repo_delete module=repo kind={} status=ok id={} version={}",
            E::KIND,
            id,
            self.version
        );
        Ok(())
    }
}

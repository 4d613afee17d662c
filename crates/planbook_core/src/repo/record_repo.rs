//! Generic record repository contract.
//!
//! # Invariants
//! - `create` assigns a fresh id; `update` preserves id and `created_at`.
//! - Unknown ids surface as `RepoError::NotFound`, never as silent no-ops.

use crate::model::record::{Entity, RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound {
        kind: &'static str,
        id: RecordId,
    },
    /// Seed data contains the same id twice.
    DuplicateId {
        kind: &'static str,
        id: RecordId,
    },
    /// Id space is exhausted.
    IdExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id: {id}"),
            Self::IdExhausted => write!(f, "record id space exhausted"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateId { .. } | Self::IdExhausted => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Data store interface for one record kind.
pub trait RecordRepository<E: Entity> {
    /// Returns the full collection in storage order.
    fn list_all(&self) -> RepoResult<Vec<E>>;
    fn get(&self, id: RecordId) -> RepoResult<Option<E>>;
    /// Stores a new record and returns it with its assigned id.
    fn create(&mut self, draft: E::Draft) -> RepoResult<E>;
    /// Replaces mutable fields of an existing record.
    fn update(&mut self, id: RecordId, draft: E::Draft) -> RepoResult<E>;
    fn delete(&mut self, id: RecordId) -> RepoResult<()>;
}

impl<E: Entity, R: RecordRepository<E> + ?Sized> RecordRepository<E> for &mut R {
    fn list_all(&self) -> RepoResult<Vec<E>> {
        (**self).list_all()
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<E>> {
        (**self).get(id)
    }

    fn create(&mut self, draft: E::Draft) -> RepoResult<E> {
        (**self).create(draft)
    }

    fn update(&mut self, id: RecordId, draft: E::Draft) -> RepoResult<E> {
        (**self).update(id, draft)
    }

    fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        (**self).delete(id)
    }
}

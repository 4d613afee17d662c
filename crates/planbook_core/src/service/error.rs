//! Service-level error shared by the use-case services.

use crate::model::record::{RecordId, ValidationError};
use crate::repo::record_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input rejected before or by the store.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound { kind: &'static str, id: RecordId },
    /// Other store failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

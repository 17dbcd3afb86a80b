use thiserror::Error;

use crate::db::StoreError;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Entity addressed by the request does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Write would duplicate a unique row.
    #[error("{0}")]
    Conflict(String),

    /// Write references a row that does not exist.
    #[error("{0}")]
    UnknownReference(&'static str),

    #[error("Student isn't enrolled in that Class")]
    NotEnrolled,
}

impl RegistryError {
    /// Map a failed insert that passed its pre-check: a unique violation
    /// means a concurrent request won the race.
    pub(crate) fn from_insert(e: StoreError, conflict: &str) -> Self {
        if e.is_unique() {
            RegistryError::Conflict(conflict.to_string())
        } else {
            RegistryError::Store(e)
        }
    }
}

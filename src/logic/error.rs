use thiserror::Error;

use crate::store::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a rejected request. Nothing is retried; each variant maps to
/// one HTTP status at the boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<StoreError>() {
            Some(e @ (StoreError::DuplicateSku(_) | StoreError::DuplicateId(_))) => {
                Self::Conflict(e.to_string())
            }
            Some(e @ StoreError::ItemMissing(_)) => Self::NotFound(e.to_string()),
            None => Self::Storage(err),
        }
    }
}

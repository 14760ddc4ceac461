//! Error types for the feedback service.

use feedtrack_store::StoreError;
use thiserror::Error;

/// Errors surfaced by feedback service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input was rejected.
    #[error("{0}")]
    Validation(String),
    /// Neither the durable nor the fallback store could serve the request.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Service could not be assembled from configuration.
    #[error("setup error: {0}")]
    Setup(String),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

use feedtrack_core::ServiceError;
use thiserror::Error;

/// Errors returned by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),
    /// The local degraded-mode service failed or rejected the input.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

use thiserror::Error;

/// Result type for the create / read operations.
pub type Result<T> = std::result::Result<T, UrlHashError>;

/// Errors raised by a storage backend.
///
/// A simple miss is never an error; backends return `Ok(None)` for it.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the create / read operations to the invocation boundary.
#[derive(Debug, Clone, Error)]
pub enum UrlHashError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("the specified hash is invalid or expired: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

//! Error types for volstore.

use thiserror::Error;

/// Common error type for volstore.
#[derive(Error, Debug)]
pub enum VolstoreError {
    /// Invalid client input (missing or unsafe filename).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upload exceeds the configured size limit.
    #[error("file size {size_bytes} bytes exceeds maximum allowed size {limit_bytes} bytes")]
    PayloadTooLarge {
        /// Observed size of the rejected upload.
        size_bytes: u64,
        /// Configured maximum file size.
        limit_bytes: u64,
    },

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The volume root cannot be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for volstore operations.
pub type Result<T> = std::result::Result<T, VolstoreError>;

//! Storage error types shared by all backends.

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach or initialize the backend store.
    #[error("connection error: {0}")]
    Connection(String),

    /// A read operation failed.
    #[error("read error: {0}")]
    Read(String),

    /// A write operation failed.
    #[error("write error: {0}")]
    Write(String),

    /// A user with the same email already exists.
    #[error("email already exists")]
    DuplicateEmail,

    /// Anything else (serialization, row mapping, ...).
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

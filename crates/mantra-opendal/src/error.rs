//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Write operation failed.
    #[error("write failed: {0}")]
    Write(String),

    /// Delete operation failed.
    #[error("delete failed: {0}")]
    Delete(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(#[from] opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Creates a new delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::Delete(msg.into())
    }
}

impl From<StorageError> for mantra_core::Error {
    fn from(err: StorageError) -> Self {
        mantra_core::Error::storage("blob store operation failed").with_source(err)
    }
}

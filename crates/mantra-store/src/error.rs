//! Document store error types.

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside a document store implementation.
///
/// The in-process store is infallible in practice; the variants exist so
/// the trait contract carries over unchanged to an external engine.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying engine rejected or failed the operation.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for mantra_core::Error {
    fn from(err: StoreError) -> Self {
        mantra_core::Error::storage("document store operation failed").with_source(err)
    }
}

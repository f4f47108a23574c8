//! Blob storage capability trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Location of a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Stable retrieval URL handed to clients.
    pub url: String,
    /// Opaque reference usable later for deletion; never exposed in error
    /// reports.
    pub blob_ref: String,
}

/// Capability trait for the blob payload store.
///
/// Backends are selected at startup by configuration; the document
/// repository only ever sees this trait, never the concrete backend.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Persists the payload and returns its retrieval URL and reference.
    ///
    /// All-or-nothing: either both fields of [`StoredBlob`] are returned
    /// or the call fails and no artifact is retained.
    async fn put(&self, data: Bytes, original_name: &str) -> Result<StoredBlob>;

    /// Deletes a previously stored blob.
    ///
    /// Idempotent: absence of the referenced artifact is not an error.
    async fn delete(&self, blob_ref: &str) -> Result<()>;
}

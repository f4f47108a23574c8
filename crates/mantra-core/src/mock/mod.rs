//! Mock implementations of capability traits for testing.
//!
//! This module provides an in-memory [`BlobStore`] double useful for unit
//! and integration testing of the document repository without touching a
//! real storage backend.
//!
//! # Feature Flag
//!
//! Only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! mantra-core = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::blob::{BlobStore, StoredBlob};
use crate::error::{Error, Result};

/// In-memory blob store double.
///
/// Stores payloads in a map keyed by the generated reference and can be
/// switched into a failing mode to exercise mid-upload storage failures.
#[derive(Debug, Default)]
pub struct MockBlobStore {
    blobs: Mutex<HashMap<String, Bytes>>,
    sequence: AtomicU64,
    fail_puts: AtomicBool,
}

impl MockBlobStore {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store whose `put` calls fail without retaining data.
    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_puts.store(true, Ordering::SeqCst);
        store
    }

    /// Switches the failing mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.fail_puts.store(failing, Ordering::SeqCst);
    }

    /// Returns whether a blob is currently retained under the reference.
    pub fn contains(&self, blob_ref: &str) -> bool {
        self.blobs.lock().expect("mock lock").contains_key(blob_ref)
    }

    /// Returns the number of retained blobs.
    pub fn len(&self) -> usize {
        self.blobs.lock().expect("mock lock").len()
    }

    /// Returns whether no blobs are retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, data: Bytes, original_name: &str) -> Result<StoredBlob> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::storage("mock blob store is failing puts"));
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let blob_ref = format!("mock-{sequence}-{original_name}");
        let url = format!("memory://blobs/{blob_ref}");

        self.blobs
            .lock()
            .expect("mock lock")
            .insert(blob_ref.clone(), data);

        Ok(StoredBlob { url, blob_ref })
    }

    async fn delete(&self, blob_ref: &str) -> Result<()> {
        self.blobs.lock().expect("mock lock").remove(blob_ref);
        Ok(())
    }
}

//! Application state and dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;
use mantra_core::BlobStore;
use mantra_opendal::StorageBackend;
use mantra_store::{DocumentStore, MemoryStore};

use crate::service::{DocumentService, ProviderAuth, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    documents: DocumentService,
    provider: ProviderAuth,
}

impl ServiceState {
    /// Creates state from already-constructed collaborators.
    ///
    /// Primarily useful for tests that inject doubles for the store or
    /// the blob backend.
    pub fn with_parts(
        store: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        provider: ProviderAuth,
    ) -> Self {
        Self {
            documents: DocumentService::new(store, blobs),
            provider,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Builds the configured blob backend and the in-process document
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend cannot be initialized.
    pub fn from_config(config: &ServiceConfig) -> mantra_core::Result<Self> {
        let backend = StorageBackend::new(config.storage.clone())?;

        let provider = match config.provider_secret.as_deref() {
            Some(secret) => ProviderAuth::from_secret(secret),
            None => ProviderAuth::disabled(),
        };

        Ok(Self::with_parts(
            Arc::new(MemoryStore::new()),
            Arc::new(backend),
            provider,
        ))
    }

    /// Returns the document repository.
    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    /// Returns the provider verification state.
    pub fn provider(&self) -> &ProviderAuth {
        &self.provider
    }
}

impl FromRef<ServiceState> for DocumentService {
    fn from_ref(state: &ServiceState) -> Self {
        state.documents.clone()
    }
}

impl FromRef<ServiceState> for ProviderAuth {
    fn from_ref(state: &ServiceState) -> Self {
        state.provider.clone()
    }
}

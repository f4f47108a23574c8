//! Service configuration.

use mantra_opendal::StorageConfig;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Blob storage backend selection, fixed at startup.
    pub storage: StorageConfig,
    /// Shared secret for provider session verification; `None` leaves the
    /// deployment on the dev-header fallback only.
    pub provider_secret: Option<String>,
}

impl ServiceConfig {
    /// Creates a configuration with the given storage backend and no
    /// provider verification.
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage,
            provider_secret: None,
        }
    }

    /// Enables provider session verification with the given secret.
    pub fn with_provider_secret(mut self, secret: impl Into<String>) -> Self {
        self.provider_secret = Some(secret.into());
        self
    }
}

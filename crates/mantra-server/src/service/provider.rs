//! Identity-provider verification configuration.

use std::sync::Arc;

use jsonwebtoken::DecodingKey;

/// System-wide provider session verification state.
///
/// Holds the decoding key for provider session tokens when one is
/// configured. Deployments without a key (dev/test harnesses) resolve
/// callers from the explicit header pair instead; deployments may also
/// configure both.
#[derive(Clone, Default)]
pub struct ProviderAuth {
    decoding_key: Option<Arc<DecodingKey>>,
}

impl ProviderAuth {
    /// Creates a configuration without provider verification.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Creates a configuration verifying tokens against a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            decoding_key: Some(Arc::new(DecodingKey::from_secret(secret.as_bytes()))),
        }
    }

    /// Returns the decoding key when provider verification is configured.
    pub fn decoding_key(&self) -> Option<&DecodingKey> {
        self.decoding_key.as_deref()
    }

    /// Returns whether provider verification is configured system-wide.
    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }
}

impl std::fmt::Debug for ProviderAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAuth")
            .field("configured", &self.is_configured())
            .finish()
    }
}

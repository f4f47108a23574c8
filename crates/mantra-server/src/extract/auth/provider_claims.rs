//! Provider session token claims.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use mantra_core::Principal;
use serde::{Deserialize, Serialize};

/// Provider-supplied metadata attached to a profile.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Administrator flag maintained by the provider.
    #[serde(default)]
    pub is_admin: bool,
}

/// Claims carried by a verified provider session token.
///
/// Profile fields are optional; [`display_name`] synthesizes the best
/// available name from them.
///
/// [`display_name`]: ProviderClaims::display_name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderClaims {
    /// Subject: the provider's user id.
    pub sub: String,
    /// Expiration time as a Unix timestamp.
    pub exp: i64,
    /// Primary email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Provider-maintained display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Account handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Provider-supplied metadata, including the admin flag.
    #[serde(default)]
    pub public_metadata: ProviderMetadata,
}

impl ProviderClaims {
    /// Verifies a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns the verification error for malformed, mis-signed, or
    /// expired tokens.
    pub fn verify(token: &str, key: &DecodingKey) -> jsonwebtoken::errors::Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["sub", "exp"]);

        decode::<Self>(token, key, &validation).map(|data| data.claims)
    }

    /// Synthesizes a display name from the profile fields.
    ///
    /// First+last name wins, falling back to the provider display name,
    /// then the handle, then the empty string.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(first) = self
            .first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            let last = self.last_name.as_deref().unwrap_or("");
            return format!("{first} {last}").trim().to_string();
        }

        self.full_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_default()
    }
}

impl From<ProviderClaims> for Principal {
    fn from(claims: ProviderClaims) -> Self {
        Self {
            name: claims.display_name(),
            id: claims.sub,
            email: claims.email.unwrap_or_default(),
            is_admin: claims.public_metadata.is_admin,
        }
    }
}

//! Resolved caller identity.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A resolved caller identity.
///
/// Produced by the principal resolver from whichever credential mechanism
/// succeeded; downstream code never cares which one that was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Opaque identity-provider or dev-supplied id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name; may be empty when the provider has none.
    pub name: String,
    /// Administrator flag from provider metadata or the dev header.
    #[serde(default)]
    pub is_admin: bool,
}

impl Principal {
    /// Returns whether this principal has administrator privileges.
    ///
    /// Idempotent predicate over the resolved principal; no live lookup.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Requires administrator privileges.
    ///
    /// # Errors
    ///
    /// Returns a `Forbidden` error when the principal is not an admin.
    pub fn authorize_admin(&self) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(Error::forbidden("admin only"))
        }
    }
}

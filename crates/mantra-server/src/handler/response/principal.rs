//! Principal response payload.

use mantra_core::Principal;
use serde::{Deserialize, Serialize};

/// The resolved caller identity as returned by `GET /api/auth/me`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    /// Identity-provider or dev-supplied id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name, possibly empty.
    pub name: String,
    /// Administrator flag.
    pub is_admin: bool,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            is_admin: principal.is_admin(),
            id: principal.id,
            email: principal.email,
            name: principal.name,
        }
    }
}

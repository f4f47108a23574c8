//! Authentication handlers.

use axum::Router;
use axum::routing::get;

use crate::extract::{AuthPrincipal, Json};
use crate::handler::Result;
use crate::handler::response::PrincipalResponse;
use crate::service::ServiceState;

/// Returns the authentication routes.
pub fn router() -> Router<ServiceState> {
    Router::new().route("/auth/me", get(me))
}

/// Echoes the resolved caller identity.
///
/// Useful for the frontend to confirm which mechanism resolved and
/// whether the caller is an administrator.
#[tracing::instrument(skip_all)]
async fn me(AuthPrincipal(principal): AuthPrincipal) -> Result<Json<PrincipalResponse>> {
    Ok(Json(principal.into()))
}

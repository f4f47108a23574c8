//! HTTP handlers and router assembly.

pub mod request;
pub mod response;

mod auth;
mod documents;
mod error;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use error::{Error, ErrorKind, Result};

use crate::service::ServiceState;

/// Ingress payload cap for uploads: 20 MiB.
///
/// Enforced here at the boundary, not inside the blob store.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Assembles the API router over the given state.
///
/// All routes are nested under `/api`; request tracing and the ingress
/// body cap wrap the whole API.
pub fn routes(state: ServiceState) -> Router {
    let api = Router::new()
        .merge(documents::router())
        .merge(auth::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state);

    Router::new().nest("/api", api)
}

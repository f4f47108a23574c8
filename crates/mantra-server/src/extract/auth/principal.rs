//! Authenticated principal extractor.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use mantra_core::Principal;

use super::resolver::resolve_principal;
use crate::handler::Error;
use crate::service::ProviderAuth;

/// Resolved caller identity for a handler.
///
/// Runs the resolution chain once per request and caches the outcome in
/// the request extensions so further extractions are free. Handlers that
/// allow anonymous callers take `Option<AuthPrincipal>`.
#[derive(Debug, Clone, Deref)]
pub struct AuthPrincipal(pub Principal);

impl AuthPrincipal {
    /// Returns the resolved principal.
    #[inline]
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
    ProviderAuth: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(cached) = parts.extensions.get::<Self>() {
            return Ok(cached.clone());
        }

        let provider = ProviderAuth::from_ref(state);
        let principal = resolve_principal(parts, &provider)?;

        let resolved = Self(principal);
        parts.extensions.insert(resolved.clone());
        Ok(resolved)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
    ProviderAuth: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(principal) => Ok(Some(principal)),
            Err(_) => Ok(None),
        }
    }
}

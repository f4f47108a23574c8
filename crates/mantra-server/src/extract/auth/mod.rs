//! Authentication module.
//!
//! Resolves caller identity from heterogeneous credential signals: a
//! provider session token when one is configured system-wide, falling
//! back to the explicit dev header pair. The resolution order is part of
//! the security contract and is encoded in [`resolver`].
//!
//! # Key Types
//!
//! - [`AuthPrincipal`] - extractor yielding the resolved [`Principal`]
//! - [`ProviderClaims`] - verified provider session token claims
//! - [`Resolution`] - per-strategy outcome of the resolution chain
//!
//! [`Principal`]: mantra_core::Principal

mod principal;
mod provider_claims;
mod resolver;

pub use self::principal::AuthPrincipal;
pub use self::provider_claims::{ProviderClaims, ProviderMetadata};
pub use self::resolver::{Resolution, resolve_principal};

/// Tracing target for authentication operations.
pub const TRACING_TARGET: &str = "mantra_server::authentication";

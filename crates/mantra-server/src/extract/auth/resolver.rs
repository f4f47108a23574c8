//! Ordered principal-resolution chain.
//!
//! Resolution walks an explicit ordered list of strategies, each of which
//! reports one of three outcomes. The walker stops at the first
//! `Resolved`; a `Rejected` outcome is sticky unless a later strategy
//! resolves; when nothing resolves the chain fails closed. The ordering
//! matters: strong verification runs first, and a forged header can never
//! pre-empt a configured provider check, while an explicit provider
//! rejection still lets the dev-header pair through ("not this
//! mechanism", not "deny access").

use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use mantra_core::Principal;

use super::ProviderClaims;
use crate::extract::auth::TRACING_TARGET;
use crate::handler::{ErrorKind, Result};
use crate::service::ProviderAuth;

/// Dev fallback headers.
const HEADER_USER_ID: &str = "x-user-id";
const HEADER_USER_EMAIL: &str = "x-user-email";
const HEADER_USER_NAME: &str = "x-user-name";
const HEADER_USER_FULLNAME: &str = "x-user-fullname";
const HEADER_USER_ADMIN: &str = "x-user-admin";

/// Outcome of a single resolver strategy.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The strategy authenticated the caller.
    Resolved(Principal),
    /// The strategy's credential mechanism was not in play.
    NotApplicable,
    /// The strategy saw a credential and explicitly rejected it.
    Rejected,
}

/// Resolves a principal from the request, or fails with a typed 401.
///
/// # Errors
///
/// `Unauthorized` when some strategy rejected a presented credential and
/// none resolved; `Unauthenticated` when no credential mechanism was in
/// play at all.
pub fn resolve_principal(parts: &Parts, provider: &ProviderAuth) -> Result<Principal> {
    let chain = [
        ("provider_session", provider_session(parts, provider)),
        ("dev_headers", dev_headers(parts)),
    ];

    let mut rejected = false;
    for (strategy, resolution) in chain {
        match resolution {
            Resolution::Resolved(principal) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    strategy,
                    principal_id = %principal.id,
                    "principal resolved"
                );
                return Ok(principal);
            }
            Resolution::Rejected => {
                tracing::warn!(target: TRACING_TARGET, strategy, "credential rejected");
                rejected = true;
            }
            Resolution::NotApplicable => {}
        }
    }

    if rejected {
        Err(ErrorKind::Unauthorized
            .with_message(
                "Unauthorized. Send a valid provider session token, or provide \
                 x-user-id and x-user-email headers in dev mode",
            )
            .with_resource("authentication"))
    } else {
        Err(ErrorKind::Unauthenticated
            .with_message(
                "Unauthorized. Provide x-user-id and x-user-email headers for dev \
                 mode, or configure a provider session token",
            )
            .with_resource("authentication"))
    }
}

/// Strategy 1: verify a bearer session token against the identity
/// provider, when a verification key is configured system-wide.
fn provider_session(parts: &Parts, provider: &ProviderAuth) -> Resolution {
    let Some(decoding_key) = provider.decoding_key() else {
        return Resolution::NotApplicable;
    };

    let Some(token) = bearer_token(parts) else {
        // Configured, but the request carries no credential for this
        // mechanism to judge.
        return Resolution::NotApplicable;
    };

    match ProviderClaims::verify(token, decoding_key) {
        Ok(claims) => Resolution::Resolved(claims.into()),
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "provider session verification failed"
            );
            Resolution::Rejected
        }
    }
}

/// Strategy 2: synthesize a principal from the explicit dev header pair.
fn dev_headers(parts: &Parts) -> Resolution {
    let Some(id) = header_value(parts, HEADER_USER_ID) else {
        return Resolution::NotApplicable;
    };
    let Some(email) = header_value(parts, HEADER_USER_EMAIL) else {
        return Resolution::NotApplicable;
    };

    let name = header_value(parts, HEADER_USER_NAME)
        .or_else(|| header_value(parts, HEADER_USER_FULLNAME))
        .unwrap_or_else(|| "Unknown".to_string());

    let is_admin = header_value(parts, HEADER_USER_ADMIN)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    Resolution::Resolved(Principal {
        id,
        email,
        name,
        is_admin,
    })
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    let value = parts.headers.get(name)?.to_str().ok()?;
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    use super::super::provider_claims::{ProviderClaims, ProviderMetadata};
    use super::*;

    const SECRET: &str = "resolver-test-secret";

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/documents/user/mine");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn token(secret: &str) -> String {
        let claims = ProviderClaims {
            sub: "user_2x".into(),
            exp: 4102444800,
            email: Some("x@example.com".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            full_name: None,
            username: None,
            public_metadata: ProviderMetadata { is_admin: true },
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn provider_token_resolves_first() {
        let provider = ProviderAuth::from_secret(SECRET);
        let bearer = format!("Bearer {}", token(SECRET));
        let parts = parts(&[
            ("authorization", bearer.as_str()),
            // Forged dev headers must not pre-empt the provider result.
            ("x-user-id", "intruder"),
            ("x-user-email", "intruder@example.com"),
        ]);

        let principal = resolve_principal(&parts, &provider).unwrap();
        assert_eq!(principal.id, "user_2x");
        assert_eq!(principal.name, "Ada Lovelace");
        assert!(principal.is_admin());
    }

    #[test]
    fn provider_rejection_falls_through_to_dev_pair() {
        let provider = ProviderAuth::from_secret(SECRET);
        let bearer = format!("Bearer {}", token("some-other-secret"));
        let parts = parts(&[
            ("authorization", bearer.as_str()),
            ("x-user-id", "dev_1"),
            ("x-user-email", "dev@example.com"),
        ]);

        let principal = resolve_principal(&parts, &provider).unwrap();
        assert_eq!(principal.id, "dev_1");
        assert_eq!(principal.name, "Unknown");
        assert!(!principal.is_admin());
    }

    #[test]
    fn provider_rejection_without_dev_pair_is_sticky() {
        let provider = ProviderAuth::from_secret(SECRET);
        let bearer = format!("Bearer {}", token("some-other-secret"));
        let parts = parts(&[("authorization", bearer.as_str())]);

        let error = resolve_principal(&parts, &provider).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn nothing_applicable_fails_closed() {
        let provider = ProviderAuth::disabled();
        let parts = parts(&[]);

        let error = resolve_principal(&parts, &provider).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn dev_pair_requires_both_headers() {
        let provider = ProviderAuth::disabled();
        let parts = parts(&[("x-user-id", "dev_1")]);

        let error = resolve_principal(&parts, &provider).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn dev_pair_reads_name_and_admin_headers() {
        let provider = ProviderAuth::disabled();
        let parts = parts(&[
            ("x-user-id", "dev_1"),
            ("x-user-email", "dev@example.com"),
            ("x-user-fullname", "Dev User"),
            ("x-user-admin", "TRUE"),
        ]);

        let principal = resolve_principal(&parts, &provider).unwrap();
        assert_eq!(principal.name, "Dev User");
        assert!(principal.is_admin());
    }

    #[test]
    fn configured_provider_without_token_still_uses_dev_pair() {
        let provider = ProviderAuth::from_secret(SECRET);
        let parts = parts(&[
            ("x-user-id", "dev_1"),
            ("x-user-email", "dev@example.com"),
        ]);

        let principal = resolve_principal(&parts, &provider).unwrap();
        assert_eq!(principal.id, "dev_1");
    }
}

//! End-to-end tests for the principal-resolution chain.

mod common;

use axum::http::StatusCode;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use mantra_server::extract::auth::{ProviderClaims, ProviderMetadata};
use mantra_server::handler::response::PrincipalResponse;
use serde_json::Value;

use crate::common::{PROVIDER_SECRET, dev_headers, spawn_app};

fn provider_token(secret: &str, is_admin: bool) -> String {
    let claims = ProviderClaims {
        sub: "user_2x".into(),
        exp: 4102444800,
        email: Some("ada@example.com".into()),
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        full_name: None,
        username: None,
        public_metadata: ProviderMetadata { is_admin },
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}

#[tokio::test]
async fn me_resolves_from_dev_headers() {
    let app = spawn_app();

    let mut request = app.server.get("/api/auth/me");
    for (name, value) in dev_headers("dev_1") {
        request = request.add_header(name, value);
    }
    let response = request.add_header("x-user-name", "Dev User").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let principal: PrincipalResponse = response.json();
    assert_eq!(principal.id, "dev_1");
    assert_eq!(principal.email, "dev_1@example.com");
    assert_eq!(principal.name, "Dev User");
    assert!(!principal.is_admin);
}

#[tokio::test]
async fn me_reads_the_admin_header_predicate() {
    let app = spawn_app();

    let mut request = app.server.get("/api/auth/me");
    for (name, value) in dev_headers("dev_1") {
        request = request.add_header(name, value);
    }
    let principal: PrincipalResponse = request.add_header("x-user-admin", "true").await.json();
    assert!(principal.is_admin);
}

#[tokio::test]
async fn me_resolves_from_a_provider_token() {
    let app = spawn_app();

    let token = provider_token(PROVIDER_SECRET, true);
    let response = app
        .server
        .get("/api/auth/me")
        .add_header("authorization", format!("Bearer {token}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let principal: PrincipalResponse = response.json();
    assert_eq!(principal.id, "user_2x");
    assert_eq!(principal.name, "Ada Lovelace");
    assert!(principal.is_admin);
}

#[tokio::test]
async fn provider_wins_over_forged_dev_headers() {
    let app = spawn_app();

    let token = provider_token(PROVIDER_SECRET, false);
    let mut request = app
        .server
        .get("/api/auth/me")
        .add_header("authorization", format!("Bearer {token}"));
    for (name, value) in dev_headers("intruder") {
        request = request.add_header(name, value);
    }

    let principal: PrincipalResponse = request.await.json();
    assert_eq!(principal.id, "user_2x");
}

#[tokio::test]
async fn provider_rejection_falls_back_to_the_dev_pair() {
    let app = spawn_app();

    let token = provider_token("not-the-server-secret", false);
    let mut request = app
        .server
        .get("/api/auth/me")
        .add_header("authorization", format!("Bearer {token}"));
    for (name, value) in dev_headers("dev_1") {
        request = request.add_header(name, value);
    }
    let response = request.await;

    // Rejection means "not this mechanism", not "deny access".
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<PrincipalResponse>().id, "dev_1");
}

#[tokio::test]
async fn provider_rejection_without_the_dev_pair_is_sticky() {
    let app = spawn_app();

    let token = provider_token("not-the-server-secret", false);
    let response = app
        .server
        .get("/api/auth/me")
        .add_header("authorization", format!("Bearer {token}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["name"], "unauthorized");
}

#[tokio::test]
async fn no_credentials_fails_closed() {
    let app = spawn_app();

    let response = app.server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["name"], "unauthenticated");
}

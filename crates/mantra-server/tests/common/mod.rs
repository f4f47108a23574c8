//! Shared harness for the API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use mantra_core::mock::MockBlobStore;
use mantra_server::handler;
use mantra_server::service::{ProviderAuth, ServiceState};
use mantra_store::MemoryStore;

/// Shared secret the test server verifies provider tokens against.
pub const PROVIDER_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub blobs: Arc<MockBlobStore>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(MockBlobStore::new())
}

pub fn spawn_app_with(blobs: MockBlobStore) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let blobs = Arc::new(blobs);

    let state = ServiceState::with_parts(
        store.clone(),
        blobs.clone(),
        ProviderAuth::from_secret(PROVIDER_SECRET),
    );
    let server = TestServer::new(handler::routes(state)).expect("test server");

    TestApp {
        server,
        store,
        blobs,
    }
}

/// Dev-header credential pair for the given user id.
pub fn dev_headers(id: &str) -> Vec<(String, String)> {
    vec![
        ("x-user-id".to_string(), id.to_string()),
        ("x-user-email".to_string(), format!("{id}@example.com")),
    ]
}

/// A minimal notes upload form with the given file name.
pub fn upload_form(file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(b"%PDF-1.4 payload".to_vec())
            .file_name(file_name.to_string())
            .mime_type("application/pdf"),
    )
}

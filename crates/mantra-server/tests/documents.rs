//! End-to-end tests for the document API surface.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use mantra_core::mock::MockBlobStore;
use mantra_server::handler::response::DocumentResponse;
use serde_json::Value;

use crate::common::{TestApp, dev_headers, spawn_app, spawn_app_with, upload_form};

async fn upload_as(app: &TestApp, user: &str, form: MultipartForm) -> axum_test::TestResponse {
    let mut request = app.server.post("/api/documents/upload").multipart(form);
    for (name, value) in dev_headers(user) {
        request = request.add_header(name, value);
    }
    request.await
}

#[tokio::test]
async fn upload_then_fetch_round_trip() {
    let app = spawn_app();

    let form = upload_form("algebra-notes.pdf")
        .add_text("title", "Algebra II")
        .add_text("description", "Midterm revision notes")
        .add_text("type", "notes")
        .add_text("subject", "Mathematics")
        .add_text("semester", "4")
        .add_text("year", "2023");
    let response = upload_as(&app, "user_a", form).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let document: DocumentResponse = response.json();
    assert_eq!(document.title, "Algebra II");
    assert_eq!(document.contributor.id, "user_a");
    assert_eq!(document.contributor.email, "user_a@example.com");
    assert_eq!(document.year, Some(2023));
    assert_eq!(document.ratings_count, 0);
    assert_eq!(document.avg_rating, 0.0);
    assert!(!document.file_url.is_empty());

    // The blob reference is internal and never serialized.
    let raw: Value = response.json();
    assert!(raw.get("fileRef").is_none());
    assert!(raw.get("file_ref").is_none());

    // Single-document reads are public.
    let fetched = app
        .server
        .get(&format!("/api/documents/{}", document.id))
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    let fetched: DocumentResponse = fetched.json();
    assert_eq!(fetched.id, document.id);
    assert_eq!(fetched.file_url, document.file_url);
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/documents/upload")
        .multipart(upload_form("notes.pdf"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["name"], "unauthenticated");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let app = spawn_app();

    let form = MultipartForm::new()
        .add_text("type", "paper")
        .add_text("session", "2022-2023");
    let response = upload_as(&app, "user_a", form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "File is required");
    assert!(app.store.is_empty().await);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn paper_uploads_validate_the_session_before_storing_anything() {
    let app = spawn_app();

    for bad_session in ["", "2022", "2022-23", "about-now"] {
        let form = upload_form("paper.pdf")
            .add_text("type", "paper")
            .add_text("session", bad_session);
        let response = upload_as(&app, "user_a", form).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let message = response.json::<Value>()["message"].as_str().unwrap().to_owned();
        assert!(message.contains("Session"), "message was: {message}");
    }

    // Nothing was persisted and no blob was written.
    assert!(app.store.is_empty().await);
    assert!(app.blobs.is_empty());

    let form = upload_form("paper.pdf")
        .add_text("type", "paper")
        .add_text("session", "2022-2023");
    let response = upload_as(&app, "user_a", form).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<DocumentResponse>().session.as_deref(),
        Some("2022-2023")
    );
}

#[tokio::test]
async fn failed_blob_write_leaves_no_record() {
    let app = spawn_app_with(MockBlobStore::failing());

    let response = upload_as(&app, "user_a", upload_form("notes.pdf")).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.store.is_empty().await);
    assert!(app.blobs.is_empty());

    let listed = app.server.get("/api/documents").await;
    assert_eq!(listed.json::<Vec<DocumentResponse>>().len(), 0);
}

#[tokio::test]
async fn catalog_filters_and_sorts_newest_first() {
    let app = spawn_app();

    let form = upload_form("older-notes.pdf")
        .add_text("type", "notes")
        .add_text("semester", "4");
    let older: DocumentResponse = upload_as(&app, "user_a", form).await.json();

    let form = upload_form("paper.pdf")
        .add_text("type", "paper")
        .add_text("semester", "4")
        .add_text("session", "2022-2023");
    upload_as(&app, "user_a", form).await;

    let form = upload_form("newer-notes.pdf")
        .add_text("type", "notes")
        .add_text("semester", "4");
    let newer: DocumentResponse = upload_as(&app, "user_b", form).await.json();

    let form = upload_form("other-semester.pdf")
        .add_text("type", "notes")
        .add_text("semester", "2");
    upload_as(&app, "user_b", form).await;

    let response = app
        .server
        .get("/api/documents")
        .add_query_param("type", "notes")
        .add_query_param("semester", "4")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listed: Vec<DocumentResponse> = response.json();
    assert_eq!(
        listed.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![newer.id, older.id],
        "only matching notes, newest first"
    );

    // The unfiltered catalog is public and contains everything.
    let all: Vec<DocumentResponse> = app.server.get("/api/documents").await.json();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn mine_lists_only_the_callers_uploads() {
    let app = spawn_app();

    upload_as(&app, "user_a", upload_form("a1.pdf")).await;
    upload_as(&app, "user_b", upload_form("b1.pdf")).await;
    upload_as(&app, "user_a", upload_form("a2.pdf")).await;

    let mut request = app.server.get("/api/documents/user/mine");
    for (name, value) in dev_headers("user_a") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listed: Vec<DocumentResponse> = response.json();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|d| d.contributor.id == "user_a"));
    // Newest first.
    assert_eq!(listed[0].title, "a2");
    assert_eq!(listed[1].title, "a1");
}

#[tokio::test]
async fn fetching_a_missing_document_is_404() {
    let app = spawn_app();

    let response = app
        .server
        .get(&format!("/api/documents/{}", uuid::Uuid::now_v7()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["name"], "not_found");
}

#[tokio::test]
async fn update_is_owner_only_and_partial() {
    let app = spawn_app();

    let form = upload_form("mine.pdf")
        .add_text("title", "Original title")
        .add_text("description", "original description");
    let document: DocumentResponse = upload_as(&app, "owner", form).await.json();

    // A non-owner gets a 403 and the record stays unchanged.
    let mut request = app
        .server
        .put(&format!("/api/documents/{}", document.id))
        .json(&serde_json::json!({"title": "Hijacked"}));
    for (name, value) in dev_headers("intruder") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let unchanged: DocumentResponse = app
        .server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .json();
    assert_eq!(unchanged.title, "Original title");

    // The owner updates only the supplied fields; empty strings are
    // applied, absent fields are untouched.
    let mut request = app
        .server
        .put(&format!("/api/documents/{}", document.id))
        .json(&serde_json::json!({"description": "", "year": 2024}));
    for (name, value) in dev_headers("owner") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: DocumentResponse = response.json();
    assert_eq!(updated.title, "Original title");
    assert_eq!(updated.description.as_deref(), Some(""));
    assert_eq!(updated.year, Some(2024));

    // Switching to `paper` without a session violates the invariant.
    let mut request = app
        .server
        .put(&format!("/api/documents/{}", document.id))
        .json(&serde_json::json!({"type": "paper"}));
    for (name, value) in dev_headers("owner") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // An unknown type never reaches the repository.
    let mut request = app
        .server
        .put(&format!("/api/documents/{}", document.id))
        .json(&serde_json::json!({"type": "thesis"}));
    for (name, value) in dev_headers("owner") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rating_validates_replaces_and_averages() {
    let app = spawn_app();

    let document: DocumentResponse = upload_as(&app, "owner", upload_form("rated.pdf"))
        .await
        .json();
    let rate_url = format!("/api/documents/{}/rate", document.id);

    // Out-of-range and non-integer values are rejected.
    let mut request = app.server.post(&rate_url).json(&serde_json::json!({"value": 6}));
    for (name, value) in dev_headers("rater_1") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let mut request = app
        .server
        .post(&rate_url)
        .json(&serde_json::json!({"value": 4.5}));
    for (name, value) in dev_headers("rater_1") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Rating twice from one principal replaces the entry.
    let mut request = app.server.post(&rate_url).json(&serde_json::json!({"value": 3}));
    for (name, value) in dev_headers("rater_1") {
        request = request.add_header(name, value);
    }
    let rated: DocumentResponse = request.await.json();
    assert_eq!(rated.ratings_count, 1);
    assert_eq!(rated.avg_rating, 3.0);

    let mut request = app.server.post(&rate_url).json(&serde_json::json!({"value": 5}));
    for (name, value) in dev_headers("rater_1") {
        request = request.add_header(name, value);
    }
    let rated: DocumentResponse = request.await.json();
    assert_eq!(rated.ratings_count, 1);
    assert_eq!(rated.avg_rating, 5.0);
    assert_eq!(rated.ratings.get("rater_1"), Some(&5));

    // A second principal adds an entry and the mean is re-derived.
    let mut request = app.server.post(&rate_url).json(&serde_json::json!({"value": 4}));
    for (name, value) in dev_headers("rater_2") {
        request = request.add_header(name, value);
    }
    let rated: DocumentResponse = request.await.json();
    assert_eq!(rated.ratings_count, 2);
    assert_eq!(rated.avg_rating, 4.5);
}

#[tokio::test]
async fn delete_is_owner_only_and_cascades_to_the_blob() {
    let app = spawn_app();

    let document: DocumentResponse = upload_as(&app, "owner", upload_form("bye.pdf"))
        .await
        .json();
    let url = format!("/api/documents/{}", document.id);
    assert_eq!(app.blobs.len(), 1);

    let mut request = app.server.delete(&url);
    for (name, value) in dev_headers("intruder") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Still retrievable after the forbidden attempt.
    let fetched = app.server.get(&url).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);

    let mut request = app.server.delete(&url);
    for (name, value) in dev_headers("owner") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(app.server.get(&url).await.status_code(), StatusCode::NOT_FOUND);
    assert!(app.blobs.is_empty());
    assert!(app.store.is_empty().await);
}

//! Document catalog handlers.
//!
//! Public reads (catalog listing, single document) and authenticated
//! mutations (upload, update, rate, delete). Authorization beyond "is
//! authenticated" lives in the repository, which owns the ownership
//! invariants.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use bytes::Bytes;
use mantra_core::DocumentKind;
use mantra_store::DocumentFilter;

use crate::extract::{AuthPrincipal, Json, Multipart, Path, Query, ValidateJson};
use crate::handler::request::{
    DocumentPathParams, ListDocumentsQuery, RateDocumentRequest, UpdateDocumentRequest,
};
use crate::handler::response::DocumentResponse;
use crate::handler::{ErrorKind, Result};
use crate::service::{DocumentService, FilePayload, ServiceState, UploadDocument};

/// Tracing target for document handlers.
const TRACING_TARGET: &str = "mantra_server::handler::documents";

/// Returns the document routes.
pub fn router() -> Router<ServiceState> {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents/upload", post(upload_document))
        .route("/documents/user/mine", get(list_my_documents))
        .route(
            "/documents/{id}",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/documents/{id}/rate", post(rate_document))
}

/// Lists catalog documents matching the query filter, newest first.
///
/// Public route.
#[tracing::instrument(skip_all)]
async fn list_documents(
    State(documents): State<DocumentService>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<DocumentResponse>>> {
    let listed = documents.list(DocumentFilter::from(query)).await?;

    Ok(Json(listed.into_iter().map(DocumentResponse::from).collect()))
}

/// Lists the authenticated caller's own uploads, newest first.
#[tracing::instrument(skip_all)]
async fn list_my_documents(
    State(documents): State<DocumentService>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<DocumentResponse>>> {
    let listed = documents.list_by_contributor(&principal.id).await?;

    Ok(Json(listed.into_iter().map(DocumentResponse::from).collect()))
}

/// Fetches a single document.
///
/// Public route.
#[tracing::instrument(skip_all)]
async fn get_document(
    State(documents): State<DocumentService>,
    Path(path_params): Path<DocumentPathParams>,
) -> Result<Json<DocumentResponse>> {
    let document = documents.get(path_params.id).await?;

    Ok(Json(document.into()))
}

/// Uploads a new document.
///
/// Multipart form: a `file` field plus optional metadata fields
/// (`title`, `description`, `type`, `subject`, `course`, `college`,
/// `semester`, `year`, `session`).
#[tracing::instrument(skip_all)]
async fn upload_document(
    State(documents): State<DocumentService>,
    AuthPrincipal(principal): AuthPrincipal,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>)> {
    let (metadata, file) = read_upload_form(multipart.into_inner()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        principal_id = %principal.id,
        kind = %metadata.kind,
        "processing document upload"
    );

    let document = documents.upload(&principal, metadata, file).await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// Applies a partial metadata update; owner only.
#[tracing::instrument(skip_all)]
async fn update_document(
    State(documents): State<DocumentService>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(path_params): Path<DocumentPathParams>,
    ValidateJson(request): ValidateJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>> {
    let updated = documents
        .update(&principal, path_params.id, request.into())
        .await?;

    Ok(Json(updated.into()))
}

/// Upserts the caller's rating for a document.
#[tracing::instrument(skip_all)]
async fn rate_document(
    State(documents): State<DocumentService>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(path_params): Path<DocumentPathParams>,
    Json(request): Json<RateDocumentRequest>,
) -> Result<Json<DocumentResponse>> {
    let rated = documents
        .rate(&principal, path_params.id, request.value)
        .await?;

    Ok(Json(rated.into()))
}

/// Deletes a document; owner only.
#[tracing::instrument(skip_all)]
async fn delete_document(
    State(documents): State<DocumentService>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(path_params): Path<DocumentPathParams>,
) -> Result<StatusCode> {
    documents.delete(&principal, path_params.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reads the multipart upload form into metadata and the file payload.
async fn read_upload_form(
    mut multipart: axum::extract::Multipart,
) -> Result<(UploadDocument, Option<FilePayload>)> {
    let mut metadata = UploadDocument::default();
    let mut file: Option<FilePayload> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(ToString::to_string);
                let data = read_file_field(field).await?;
                file = Some(FilePayload {
                    name: file_name,
                    data,
                });
            }
            "title" => metadata.title = Some(text_field(field).await?),
            "description" => metadata.description = Some(text_field(field).await?),
            "type" => {
                let raw = text_field(field).await?;
                metadata.kind = raw.trim().parse::<DocumentKind>().map_err(|_| {
                    ErrorKind::BadRequest.with_message("Invalid type. Use 'notes' or 'paper'")
                })?;
            }
            "subject" => metadata.subject = Some(text_field(field).await?),
            "course" => metadata.course = Some(text_field(field).await?),
            "college" => metadata.college = Some(text_field(field).await?),
            "semester" => metadata.semester = Some(text_field(field).await?),
            "year" => {
                let raw = text_field(field).await?;
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    metadata.year = Some(trimmed.parse::<i32>().map_err(|_| {
                        ErrorKind::BadRequest.with_message("Year must be a number")
                    })?);
                }
            }
            "session" => metadata.session = Some(text_field(field).await?),
            other => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    field = other,
                    "ignoring unknown upload field"
                );
            }
        }
    }

    Ok((metadata, file))
}

async fn next_field(
    multipart: &mut axum::extract::Multipart,
) -> Result<Option<axum::extract::multipart::Field<'_>>> {
    multipart.next_field().await.map_err(|err| {
        tracing::warn!(target: TRACING_TARGET, error = %err, "failed to read multipart field");
        ErrorKind::BadRequest.with_message(format!("Invalid multipart data: {err}"))
    })
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field.text().await.map_err(|err| {
        ErrorKind::BadRequest.with_message(format!("Invalid multipart field: {err}"))
    })
}

async fn read_file_field(field: axum::extract::multipart::Field<'_>) -> Result<Bytes> {
    field.bytes().await.map_err(|err| {
        tracing::warn!(target: TRACING_TARGET, error = %err, "failed to read upload payload");
        ErrorKind::BadRequest.with_message(format!("Failed to read file data: {err}"))
    })
}

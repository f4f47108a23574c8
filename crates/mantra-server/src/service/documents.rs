//! Document repository.
//!
//! Owns the document lifecycle and enforces the ownership, validation,
//! and rating invariants. Depends on the blob store and document store
//! capability traits only; which backends sit behind them is a startup
//! concern.

use std::sync::Arc;

use bytes::Bytes;
use mantra_core::types::is_valid_session;
use mantra_core::{
    BlobStore, Contributor, Document, DocumentKind, Error, Principal, Result, rating,
};
use mantra_store::{DocumentFilter, DocumentStore, NewDocument, SortOrder, UpdateDocument};
use uuid::Uuid;

/// Tracing target for document repository operations.
const TRACING_TARGET: &str = "mantra_server::service::documents";

/// Metadata fields accompanying an upload.
#[derive(Debug, Default, Clone)]
pub struct UploadDocument {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: DocumentKind,
    pub subject: Option<String>,
    pub course: Option<String>,
    pub college: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub session: Option<String>,
}

/// The uploaded file payload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// Original file name as sent by the client, if any.
    pub name: Option<String>,
    /// Raw payload bytes.
    pub data: Bytes,
}

/// Repository for the document lifecycle.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl DocumentService {
    /// Creates a repository over the given collaborators.
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Uploads a new document on behalf of the principal.
    ///
    /// All synchronous validation runs strictly before the blob store is
    /// touched, so a rejected upload never leaves an orphaned blob, and a
    /// failed blob write never leaves orphaned metadata.
    ///
    /// # Errors
    ///
    /// `Validation` when the file is missing or a paper carries no
    /// well-formed session; `Storage` when a collaborator fails.
    pub async fn upload(
        &self,
        principal: &Principal,
        metadata: UploadDocument,
        file: Option<FilePayload>,
    ) -> Result<Document> {
        let Some(file) = file else {
            return Err(Error::validation("File is required"));
        };

        if metadata.kind == DocumentKind::Paper {
            ensure_paper_session(metadata.session.as_deref())?;
        }

        let title = effective_title(
            metadata.title.as_deref(),
            metadata.subject.as_deref(),
            file.name.as_deref(),
        );

        let original_name = file.name.as_deref().unwrap_or("upload");
        let stored = self.blobs.put(file.data, original_name).await?;

        let document = self
            .store
            .insert(NewDocument {
                title,
                description: metadata.description,
                kind: metadata.kind,
                subject: metadata.subject,
                course: metadata.course,
                college: metadata.college,
                semester: metadata.semester,
                year: metadata.year,
                session: metadata.session,
                file_url: stored.url,
                file_ref: stored.blob_ref,
                contributor: Contributor::from(principal),
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(
            target: TRACING_TARGET,
            document_id = %document.id,
            contributor_id = %document.contributor.id,
            kind = %document.kind,
            "document uploaded"
        );

        Ok(document)
    }

    /// Lists catalog documents matching the filter, newest first.
    pub async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>> {
        Ok(self.store.find(&filter, SortOrder::CreatedAtDesc).await?)
    }

    /// Lists the given contributor's documents, newest first.
    pub async fn list_by_contributor(&self, principal_id: &str) -> Result<Vec<Document>> {
        let filter = DocumentFilter::by_contributor(principal_id);
        Ok(self.store.find(&filter, SortOrder::CreatedAtDesc).await?)
    }

    /// Fetches a document by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id has no record.
    pub async fn get(&self, id: Uuid) -> Result<Document> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("document"))
    }

    /// Applies a partial metadata update on behalf of the principal.
    ///
    /// Only supplied fields are touched; the updated record must still
    /// satisfy the paper/session invariant.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` for a non-owner, `Validation` when the
    /// update would leave a paper without a well-formed session.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        changes: UpdateDocument,
    ) -> Result<Document> {
        let document = self.get(id).await?;

        if !document.is_owned_by(&principal.id) {
            return Err(Error::forbidden("you can only update your own document"));
        }

        // Validate the post-update shape before anything is persisted.
        let mut preview = document;
        changes.apply_to(&mut preview);
        if preview.kind == DocumentKind::Paper {
            ensure_paper_session(preview.session.as_deref())?;
        }

        let updated = self
            .store
            .modify(id, Box::new(move |doc| changes.apply_to(doc)))
            .await?
            .ok_or_else(|| Error::not_found("document"))?;

        tracing::info!(
            target: TRACING_TARGET,
            document_id = %updated.id,
            "document updated"
        );

        Ok(updated)
    }

    /// Upserts the principal's rating and recomputes the aggregates.
    ///
    /// The upsert and recompute run as one read-modify-write against the
    /// record, so concurrent ratings from different principals are both
    /// retained.
    ///
    /// # Errors
    ///
    /// `Validation` unless `value` is an integer 1 through 5; `NotFound`
    /// when the id has no record.
    pub async fn rate(&self, principal: &Principal, id: Uuid, value: i64) -> Result<Document> {
        if !(1..=5).contains(&value) {
            return Err(Error::validation("Rating must be 1-5"));
        }
        let value = value as u8;

        let principal_id = principal.id.clone();
        let rated = self
            .store
            .modify(
                id,
                Box::new(move |doc| {
                    doc.ratings.insert(principal_id, value);
                    let summary = rating::aggregate(&doc.ratings);
                    doc.ratings_count = summary.count;
                    doc.avg_rating = summary.avg;
                }),
            )
            .await?
            .ok_or_else(|| Error::not_found("document"))?;

        tracing::debug!(
            target: TRACING_TARGET,
            document_id = %rated.id,
            ratings_count = rated.ratings_count,
            avg_rating = rated.avg_rating,
            "rating recorded"
        );

        Ok(rated)
    }

    /// Deletes a document on behalf of its owner.
    ///
    /// The blob delete is attempted first but is best-effort: a failure
    /// is logged and metadata deletion proceeds regardless.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` for a non-owner.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        let document = self.get(id).await?;

        if !document.is_owned_by(&principal.id) {
            return Err(Error::forbidden("you can only delete your own document"));
        }

        if let Err(err) = self.blobs.delete(&document.file_ref).await {
            tracing::warn!(
                target: TRACING_TARGET,
                document_id = %id,
                error = %err,
                "blob delete failed, continuing with metadata delete"
            );
        }

        if !self.store.delete_by_id(id).await? {
            return Err(Error::not_found("document"));
        }

        tracing::info!(
            target: TRACING_TARGET,
            document_id = %id,
            "document deleted"
        );

        Ok(())
    }
}

/// First non-blank of explicit title, subject, and the file name with its
/// extension stripped.
fn effective_title(title: Option<&str>, subject: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if let Some(subject) = subject.map(str::trim).filter(|s| !s.is_empty()) {
        return subject.to_string();
    }

    match file_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(name)
            .to_string(),
        None => "Untitled".to_string(),
    }
}

fn ensure_paper_session(session: Option<&str>) -> Result<()> {
    match session.map(str::trim) {
        None | Some("") => Err(Error::validation(
            "Session is required for papers (e.g., 2022-2023)",
        )),
        Some(session) if !is_valid_session(session) => Err(Error::validation(
            "Session must match the YYYY-YYYY shape (e.g., 2022-2023)",
        )),
        Some(_) => Ok(()),
    }
}

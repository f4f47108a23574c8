//! Request payloads for document handlers.

use mantra_core::DocumentKind;
use mantra_store::{DocumentFilter, UpdateDocument};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// `Path` param for `/documents/{id}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentPathParams {
    /// Unique identifier of the document.
    pub id: Uuid,
}

/// Catalog query parameters; every predicate is optional.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    /// Match on document category.
    #[serde(rename = "type")]
    pub kind: Option<DocumentKind>,
    /// Match on course.
    pub course: Option<String>,
    /// Match on college.
    pub college: Option<String>,
    /// Match on subject.
    pub subject: Option<String>,
    /// Match on semester label.
    pub semester: Option<String>,
    /// Match on year.
    pub year: Option<i32>,
    /// Match on paper session.
    pub session: Option<String>,
}

impl From<ListDocumentsQuery> for DocumentFilter {
    fn from(query: ListDocumentsQuery) -> Self {
        Self {
            kind: query.kind,
            course: query.course,
            college: query.college,
            subject: query.subject,
            semester: query.semester,
            session: query.session,
            year: query.year,
            contributor_id: None,
        }
    }
}

/// Partial metadata body for `PUT /documents/{id}`.
///
/// Absent fields stay untouched; a present-but-empty string is still a
/// supplied value. `type` membership is enforced at deserialization.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    /// New display title; blank keeps the current one.
    #[validate(length(max = 255))]
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New document category.
    #[serde(rename = "type")]
    pub kind: Option<DocumentKind>,
    /// New subject.
    pub subject: Option<String>,
    /// New course.
    pub course: Option<String>,
    /// New college.
    pub college: Option<String>,
    /// New semester label.
    pub semester: Option<String>,
    /// New year.
    pub year: Option<i32>,
    /// New paper session.
    pub session: Option<String>,
}

impl From<UpdateDocumentRequest> for UpdateDocument {
    fn from(request: UpdateDocumentRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            kind: request.kind,
            subject: request.subject,
            course: request.course,
            college: request.college,
            semester: request.semester,
            year: request.year,
            session: request.session,
        }
    }
}

/// Body for `POST /documents/{id}/rate`.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateDocumentRequest {
    /// Rating value; must be an integer between 1 and 5.
    pub value: i64,
}

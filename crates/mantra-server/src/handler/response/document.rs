//! Document response payloads.

use std::collections::BTreeMap;

use jiff::Timestamp;
use mantra_core::{Contributor, Document, DocumentKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document as exposed over the API.
///
/// Mirrors the stored entity except for the blob reference, which is an
/// internal storage identifier and stays server-side.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    /// ID of the document.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Document category.
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Subject the document belongs to.
    pub subject: Option<String>,
    /// Course the document belongs to.
    pub course: Option<String>,
    /// College the document originates from.
    pub college: Option<String>,
    /// Semester label.
    pub semester: Option<String>,
    /// Calendar year the material covers.
    pub year: Option<i32>,
    /// Academic-year range for papers.
    pub session: Option<String>,
    /// Retrieval URL for the uploaded payload.
    pub file_url: String,
    /// Snapshot of the uploading principal.
    pub contributor: Contributor,
    /// One rating per principal id.
    pub ratings: BTreeMap<String, u8>,
    /// Number of ratings.
    pub ratings_count: u32,
    /// Mean rating rounded to 2 decimals.
    pub avg_rating: f64,
    /// Timestamp when the document was uploaded.
    pub created_at: Timestamp,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            title: document.title,
            description: document.description,
            kind: document.kind,
            subject: document.subject,
            course: document.course,
            college: document.college,
            semester: document.semester,
            year: document.year,
            session: document.session,
            file_url: document.file_url,
            contributor: document.contributor,
            ratings: document.ratings,
            ratings_count: document.ratings_count,
            avg_rating: document.avg_rating,
            created_at: document.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_hides_the_blob_reference() {
        let document = Document {
            id: Uuid::now_v7(),
            title: "Algebra notes".into(),
            description: None,
            kind: DocumentKind::Notes,
            subject: Some("Algebra".into()),
            course: None,
            college: None,
            semester: Some("4".into()),
            year: Some(2023),
            session: None,
            file_url: "http://localhost:5000/uploads/1-algebra.pdf".into(),
            file_ref: "1-algebra.pdf".into(),
            contributor: Contributor {
                id: "user_1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
            ratings: BTreeMap::new(),
            ratings_count: 0,
            avg_rating: 0.0,
            created_at: Timestamp::now(),
        };

        let json = serde_json::to_string(&DocumentResponse::from(document)).unwrap();
        assert!(json.contains("\"fileUrl\""));
        assert!(json.contains("\"type\":\"notes\""));
        assert!(!json.contains("fileRef"));
        assert!(!json.contains("file_ref"));
    }
}

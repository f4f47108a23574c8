//! Document store trait.

use async_trait::async_trait;
use mantra_core::{Contributor, Document, DocumentKind};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::filter::{DocumentFilter, SortOrder};

/// Single-document mutation applied under the store's write guard.
pub type ModifyFn = Box<dyn FnOnce(&mut Document) + Send>;

/// Fields of a document to be inserted.
///
/// The store assigns `id` and `created_at`; everything else is provided by
/// the repository, with `file_url`/`file_ref` always set together.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub kind: DocumentKind,
    pub subject: Option<String>,
    pub course: Option<String>,
    pub college: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub session: Option<String>,
    pub file_url: String,
    pub file_ref: String,
    pub contributor: Contributor,
}

/// Partial metadata change-set for an existing document.
///
/// Only fields carried as `Some` are applied; a field that is present but
/// empty is still applied (present-but-empty is not absent). A blank title
/// keeps the existing one, a document title is never blank.
#[derive(Debug, Default, Clone)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<DocumentKind>,
    pub subject: Option<String>,
    pub course: Option<String>,
    pub college: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub session: Option<String>,
}

impl UpdateDocument {
    /// Applies the change-set to a document in place.
    pub fn apply_to(&self, document: &mut Document) {
        if let Some(ref title) = self.title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                document.title = trimmed.to_string();
            }
        }
        if let Some(ref description) = self.description {
            document.description = Some(description.clone());
        }
        if let Some(kind) = self.kind {
            document.kind = kind;
        }
        if let Some(ref subject) = self.subject {
            document.subject = Some(subject.clone());
        }
        if let Some(ref course) = self.course {
            document.course = Some(course.clone());
        }
        if let Some(ref college) = self.college {
            document.college = Some(college.clone());
        }
        if let Some(ref semester) = self.semester {
            document.semester = Some(semester.clone());
        }
        if let Some(year) = self.year {
            document.year = Some(year);
        }
        if let Some(ref session) = self.session {
            document.session = Some(session.clone());
        }
    }
}

/// The generic document store collaborator.
///
/// Deliberately small: find/insert/modify/delete-by-id with a sort option.
/// Persistence engine internals stay behind this trait; [`modify`] is the
/// atomic single-document read-modify-write primitive rating mutations
/// rely on.
///
/// [`modify`]: DocumentStore::modify
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Inserts a new document, assigning its id and creation timestamp.
    async fn insert(&self, new_document: NewDocument) -> StoreResult<Document>;

    /// Finds all documents matching the filter, in the given order.
    async fn find(&self, filter: &DocumentFilter, sort: SortOrder) -> StoreResult<Vec<Document>>;

    /// Finds a document by id.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Document>>;

    /// Applies a mutation to a single document as one atomic
    /// read-modify-write and returns the updated document, or `None` when
    /// the id has no record.
    ///
    /// Two concurrent `modify` calls against the same document are
    /// serialized; neither observes the other mid-mutation.
    async fn modify(&self, id: Uuid, apply: ModifyFn) -> StoreResult<Option<Document>>;

    /// Removes a document by id; returns whether a record was removed.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
}

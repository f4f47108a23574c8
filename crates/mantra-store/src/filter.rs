//! Catalog query filter.

use mantra_core::{Document, DocumentKind};
use serde::{Deserialize, Serialize};

/// Sort option for catalog queries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first; the catalog default.
    #[default]
    CreatedAtDesc,
    /// Oldest first.
    CreatedAtAsc,
}

/// Composition of optional equality predicates over the catalog.
///
/// An unset field matches everything; set fields must all match. This is
/// the entire read-side query model, there is no pagination at this scale.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    /// Match on the document category.
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
    /// Match on paper session.
    pub session: Option<String>,
    /// Match on year.
    pub year: Option<i32>,
    /// Match on the contributor snapshot id.
    pub contributor_id: Option<String>,
}

impl DocumentFilter {
    /// Returns a filter that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns a filter over a single contributor's documents.
    pub fn by_contributor(principal_id: impl Into<String>) -> Self {
        Self {
            contributor_id: Some(principal_id.into()),
            ..Self::default()
        }
    }

    /// Returns whether the document satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        fn eq_opt(wanted: &Option<String>, actual: Option<&str>) -> bool {
            match wanted {
                Some(wanted) => actual == Some(wanted.as_str()),
                None => true,
            }
        }

        if let Some(kind) = self.kind
            && document.kind != kind
        {
            return false;
        }

        if let Some(year) = self.year
            && document.year != Some(year)
        {
            return false;
        }

        if let Some(ref contributor_id) = self.contributor_id
            && document.contributor.id != *contributor_id
        {
            return false;
        }

        eq_opt(&self.course, document.course.as_deref())
            && eq_opt(&self.college, document.college.as_deref())
            && eq_opt(&self.subject, document.subject.as_deref())
            && eq_opt(&self.semester, document.semester.as_deref())
            && eq_opt(&self.session, document.session.as_deref())
    }
}

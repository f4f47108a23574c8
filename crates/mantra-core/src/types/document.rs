//! Document entity and contributor snapshot.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use jiff::Timestamp;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::types::Principal;

/// Academic-year session shape for past papers, e.g. `2022-2023`.
static SESSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}$").expect("session pattern is valid"));

/// Returns whether the given string is a well-formed paper session.
#[must_use]
pub fn is_valid_session(session: &str) -> bool {
    SESSION_PATTERN.is_match(session)
}

/// Category of an uploaded study document.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
    /// Lecture or revision notes.
    #[default]
    Notes,
    /// A past examination paper; requires a `session`.
    Paper,
}

/// Immutable copy of the uploading principal's identity fields.
///
/// Stored on the document at creation time so historical attribution
/// survives later principal changes. `id` is the sole ownership key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// Identity of the uploading principal at creation time.
    pub id: String,
    /// Display name at creation time.
    pub name: String,
    /// Email at creation time.
    pub email: String,
}

impl From<&Principal> for Contributor {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            name: principal.name.clone(),
            email: principal.email.clone(),
        }
    }
}

/// A contributed study document with its embedded ratings.
///
/// `ratings_count` and `avg_rating` are derived from the authoritative
/// `ratings` mapping and recomputed on every rating mutation rather than
/// maintained incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Store-assigned identifier, immutable.
    pub id: Uuid,
    /// Non-empty display title.
    pub title: String,
    /// Optional free-form description.
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
    /// Semester label, free-form (e.g. `"4"`).
    pub semester: Option<String>,
    /// Calendar year the material covers.
    pub year: Option<i32>,
    /// Academic-year range (`YYYY-YYYY`), present iff `kind` is `paper`.
    pub session: Option<String>,
    /// Retrieval URL for the uploaded payload, immutable once set.
    pub file_url: String,
    /// Opaque blob reference used for deletion, immutable once set.
    pub file_ref: String,
    /// Snapshot of the uploading principal.
    pub contributor: Contributor,
    /// One rating per principal id, last write wins.
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
    /// Derived: number of entries in `ratings`.
    #[serde(default)]
    pub ratings_count: u32,
    /// Derived: mean rating rounded to 2 decimals, `0.0` when unrated.
    #[serde(default)]
    pub avg_rating: f64,
    /// Set once at creation.
    pub created_at: Timestamp,
}

impl Document {
    /// Returns whether the given principal id owns this document.
    ///
    /// Ownership is an exact match on the identity captured at creation
    /// time, never re-resolved against a live profile.
    #[must_use]
    pub fn is_owned_by(&self, principal_id: &str) -> bool {
        self.contributor.id == principal_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_shape() {
        assert!(is_valid_session("2022-2023"));
        assert!(is_valid_session("1999-2000"));
        assert!(!is_valid_session(""));
        assert!(!is_valid_session("2022"));
        assert!(!is_valid_session("2022-23"));
        assert!(!is_valid_session("2022/2023"));
        assert!(!is_valid_session(" 2022-2023"));
    }

    #[test]
    fn kind_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&DocumentKind::Paper).unwrap(), "\"paper\"");
        let kind: DocumentKind = serde_json::from_str("\"notes\"").unwrap();
        assert_eq!(kind, DocumentKind::Notes);
        assert!("thesis".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn contributor_snapshot_copies_fields() {
        let principal = Principal {
            id: "user_1".into(),
            email: "a@example.com".into(),
            name: "Ada".into(),
            is_admin: true,
        };
        let snapshot = Contributor::from(&principal);
        assert_eq!(snapshot.id, "user_1");
        assert_eq!(snapshot.name, "Ada");
        assert_eq!(snapshot.email, "a@example.com");
    }
}

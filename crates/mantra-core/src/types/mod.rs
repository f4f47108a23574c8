//! Domain entity types shared across the workspace.

mod document;
mod principal;

pub use document::{Contributor, Document, DocumentKind, is_valid_session};
pub use principal::Principal;

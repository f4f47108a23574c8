//! Request payload types.

mod documents;

pub use documents::{
    DocumentPathParams, ListDocumentsQuery, RateDocumentRequest, UpdateDocumentRequest,
};

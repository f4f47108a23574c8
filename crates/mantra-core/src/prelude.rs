//! Convenient re-exports for common use.

pub use crate::blob::{BlobStore, StoredBlob};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::rating::{RatingSummary, aggregate};
pub use crate::types::{Contributor, Document, DocumentKind, Principal};

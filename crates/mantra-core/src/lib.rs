#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod blob;
mod error;
pub mod rating;
pub mod types;

#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use blob::{BlobStore, StoredBlob};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use types::{Contributor, Document, DocumentKind, Principal};

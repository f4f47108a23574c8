#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod filter;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use filter::{DocumentFilter, SortOrder};
pub use memory::MemoryStore;
pub use store::{DocumentStore, ModifyFn, NewDocument, UpdateDocument};

/// Tracing target for document store operations.
pub const TRACING_TARGET: &str = "mantra_store";

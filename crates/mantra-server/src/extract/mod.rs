//! HTTP request extractors.
//!
//! # Extractor Categories
//!
//! ## Authentication
//!
//! - [`AuthPrincipal`] - resolved caller identity with request caching
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with better error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] / [`Query`] - parameter extraction with detailed errors
//! - [`Multipart`] - multipart form extraction for uploads

pub mod auth;
pub mod reject;

pub use crate::extract::auth::AuthPrincipal;
pub use crate::extract::reject::{Json, Multipart, Path, Query, ValidateJson};

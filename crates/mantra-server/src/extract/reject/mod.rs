//! Enhanced request extractors with improved error handling.
//!
//! Drop-in replacements for the stock axum extractors that reject with the
//! server's own [`Error`] type so every failure serializes as the standard
//! [`ErrorResponse`] body.
//!
//! [`Error`]: crate::handler::Error
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

mod enhanced_json;
mod enhanced_multipart;
mod enhanced_path;
mod enhanced_query;
mod validated_json;

pub use enhanced_json::Json;
pub use enhanced_multipart::Multipart;
pub use enhanced_path::Path;
pub use enhanced_query::Query;
pub use validated_json::ValidateJson;

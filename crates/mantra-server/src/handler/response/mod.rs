//! Response payload types.

mod document;
mod error_response;
mod principal;

pub use document::DocumentResponse;
pub use error_response::ErrorResponse;
pub use principal::PrincipalResponse;

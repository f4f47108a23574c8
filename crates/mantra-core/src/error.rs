//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error as ThisError;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source slot of [`Error`] so any underlying failure (storage
/// backend, token verification, I/O) can be carried along the chain.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of failures that repository operations can produce.
///
/// The categories follow the service's error taxonomy: validation and
/// authorization failures are detected before any externally-visible side
/// effect, storage failures surface as server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed; the operation was aborted before any
    /// persistence or blob side effect.
    Validation,
    /// No resolvable principal on the request.
    Unauthenticated,
    /// A credential was presented and explicitly rejected.
    Unauthorized,
    /// Principal resolved but is not permitted to perform the operation.
    Forbidden,
    /// The referenced record does not exist.
    NotFound,
    /// Blob or document-store I/O error.
    Storage,
    /// Internal invariant or configuration error.
    Internal,
}

/// A structured error for repository and storage operations.
#[derive(Debug, ThisError)]
#[error("{}{}", kind.as_ref(), message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional human-readable message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Creates a new validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation).with_message(message)
    }

    /// Creates a new unauthenticated error.
    pub fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated)
    }

    /// Creates a new unauthorized error.
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    /// Creates a new forbidden error with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden).with_message(message)
    }

    /// Creates a new not found error for the given resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound).with_message(resource)
    }

    /// Creates a new storage error with the given message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage).with_message(message)
    }

    /// Creates a new internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal).with_message(message)
    }
}

//! Service layer: configuration, dependency-injection state, and the
//! document repository.

mod config;
mod documents;
mod provider;
mod state;

pub use config::ServiceConfig;
pub use documents::{DocumentService, FilePayload, UploadDocument};
pub use provider::ProviderAuth;
pub use state::ServiceState;

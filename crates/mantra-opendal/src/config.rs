//! Storage configuration types.

use serde::{Deserialize, Serialize};

/// Storage backend configuration.
///
/// Selected once at startup; the repository never branches on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StorageConfig {
    /// Local uploads directory served by the HTTP server itself.
    Fs(FsConfig),
    /// Amazon S3 compatible object storage.
    S3(S3Config),
}

impl StorageConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Fs(_) => "fs",
            Self::S3(_) => "s3",
        }
    }
}

/// Local filesystem backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Directory that holds uploaded payloads.
    pub root: String,
    /// Origin under which the server exposes `/uploads`, e.g.
    /// `http://localhost:5000`.
    pub public_base_url: String,
}

/// S3-compatible backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Key prefix for uploaded objects.
    #[serde(default = "S3Config::default_prefix")]
    pub prefix: String,
    /// Bucket region.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key id; falls back to the ambient credential chain.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key; falls back to the ambient credential chain.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Secure base URL under which stored objects are reachable.
    pub public_base_url: String,
}

impl S3Config {
    fn default_prefix() -> String {
        "studymantra".to_string()
    }
}

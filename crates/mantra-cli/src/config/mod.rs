//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, ValueEnum};
use mantra_opendal::{FsConfig, S3Config, StorageConfig};
use mantra_server::service::ServiceConfig;

use crate::TRACING_TARGET_CONFIG;

/// StudyMantra backend API server.
#[derive(Debug, Parser)]
#[command(name = "mantra", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub auth: AuthArgs,
}

impl Cli {
    /// Builds the service configuration from the parsed arguments.
    pub fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        let storage = self.storage.storage_config(&self.server)?;

        let mut config = ServiceConfig::new(storage);
        if let Some(secret) = self.auth.provider_secret.as_deref() {
            config = config.with_provider_secret(secret);
        }

        Ok(config)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to.
    ///
    /// Use "127.0.0.1" for localhost only, "0.0.0.0" for all interfaces.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns whether the server binds to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }
}

/// Blob storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendKind {
    /// Local uploads directory served by this server.
    Fs,
    /// S3-compatible object storage.
    S3,
}

/// Blob storage configuration.
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Storage backend for uploaded payloads.
    #[arg(long = "storage-backend", env = "STORAGE_BACKEND", value_enum, default_value = "fs")]
    pub backend: StorageBackendKind,

    /// Uploads directory for the fs backend.
    #[arg(long, env = "UPLOADS_DIR", default_value = "./uploads")]
    pub uploads_dir: PathBuf,

    /// Public origin under which stored payloads are reachable.
    ///
    /// Defaults to the server's own address for the fs backend and to the
    /// bucket endpoint for the s3 backend.
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Bucket name (s3 backend).
    #[arg(long, env = "S3_BUCKET")]
    pub s3_bucket: Option<String>,

    /// Object key prefix (s3 backend).
    #[arg(long, env = "S3_PREFIX", default_value = "studymantra")]
    pub s3_prefix: String,

    /// Bucket region (s3 backend).
    #[arg(long, env = "S3_REGION")]
    pub s3_region: Option<String>,

    /// Custom endpoint for S3-compatible stores.
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Access key id; omit to use the ambient credential chain.
    #[arg(long, env = "S3_ACCESS_KEY_ID", hide_env_values = true)]
    pub s3_access_key_id: Option<String>,

    /// Secret access key; omit to use the ambient credential chain.
    #[arg(long, env = "S3_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub s3_secret_access_key: Option<String>,
}

impl StorageArgs {
    /// Builds the storage backend configuration.
    pub fn storage_config(&self, server: &ServerConfig) -> anyhow::Result<StorageConfig> {
        match self.backend {
            StorageBackendKind::Fs => {
                let public_base_url = self
                    .public_base_url
                    .clone()
                    .unwrap_or_else(|| format!("http://{}", server.server_addr()));

                // Created eagerly so the first upload cannot race it.
                std::fs::create_dir_all(&self.uploads_dir).with_context(|| {
                    format!("failed to create uploads dir {}", self.uploads_dir.display())
                })?;

                Ok(StorageConfig::Fs(FsConfig {
                    root: self.uploads_dir.display().to_string(),
                    public_base_url,
                }))
            }
            StorageBackendKind::S3 => {
                let Some(bucket) = self.s3_bucket.clone() else {
                    bail!("--s3-bucket (or S3_BUCKET) is required for the s3 backend");
                };

                let public_base_url = self.public_base_url.clone().unwrap_or_else(|| {
                    match self.s3_endpoint.as_deref() {
                        Some(endpoint) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
                        None => format!("https://{bucket}.s3.amazonaws.com"),
                    }
                });

                Ok(StorageConfig::S3(S3Config {
                    bucket,
                    prefix: self.s3_prefix.clone(),
                    region: self.s3_region.clone(),
                    endpoint: self.s3_endpoint.clone(),
                    access_key_id: self.s3_access_key_id.clone(),
                    secret_access_key: self.s3_secret_access_key.clone(),
                    public_base_url,
                }))
            }
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// Shared secret for provider session verification.
    ///
    /// When unset, only the dev header pair authenticates callers.
    #[arg(long = "provider-secret", env = "PROVIDER_JWT_SECRET", hide_env_values = true)]
    pub provider_secret: Option<String>,
}

/// Logs the effective configuration at startup.
pub fn log_config(cli: &Cli, storage: &StorageConfig) {
    tracing::info!(
        target: TRACING_TARGET_CONFIG,
        host = %cli.server.host,
        port = cli.server.port,
        storage_backend = storage.backend_name(),
        provider_auth = cli.auth.provider_secret.is_some(),
        "configuration loaded"
    );
}

//! Storage backend implementation.

use async_trait::async_trait;
use bytes::Bytes;
use mantra_core::{BlobStore, StoredBlob};
use opendal::{ErrorKind, Operator, services};

use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Unified storage backend that wraps OpenDAL operators.
///
/// Implements [`BlobStore`] for both supported backends; which one is in
/// play is fixed when the backend is constructed from [`StorageConfig`].
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend_name(),
            "storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Generates a collision-resistant object name from the original
    /// file name: millisecond timestamp plus the sanitized name.
    fn object_name(original_name: &str) -> String {
        let millis = jiff::Timestamp::now().as_millisecond();
        format!("{millis}-{}", sanitize_file_name(original_name))
    }

    /// Returns the storage path and public URL for a new object.
    fn locate(&self, object_name: &str) -> (String, String) {
        match &self.config {
            StorageConfig::Fs(fs) => {
                let base = fs.public_base_url.trim_end_matches('/');
                (object_name.to_string(), format!("{base}/uploads/{object_name}"))
            }
            StorageConfig::S3(s3) => {
                let key = format!("{}/{object_name}", s3.prefix.trim_matches('/'));
                let base = s3.public_base_url.trim_end_matches('/');
                let url = format!("{base}/{key}");
                (key, url)
            }
        }
    }

    /// Creates an OpenDAL operator based on configuration.
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config {
            StorageConfig::Fs(fs) => {
                let builder = services::Fs::default().root(&fs.root);

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }
            StorageConfig::S3(s3) => {
                let mut builder = services::S3::default().bucket(&s3.bucket);

                if let Some(ref region) = s3.region {
                    builder = builder.region(region);
                }

                if let Some(ref endpoint) = s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref access_key_id) = s3.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }

                if let Some(ref secret_access_key) = s3.secret_access_key {
                    builder = builder.secret_access_key(secret_access_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl BlobStore for StorageBackend {
    async fn put(&self, data: Bytes, original_name: &str) -> mantra_core::Result<StoredBlob> {
        let object_name = Self::object_name(original_name);
        let (path, url) = self.locate(&object_name);

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "writing blob"
        );

        if let Err(err) = self.operator.write(&path, data.to_vec()).await {
            // Leave nothing behind on a failed write.
            let _ = self.operator.delete(&path).await;
            return Err(StorageError::write(err.to_string()).into());
        }

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "blob write complete"
        );

        Ok(StoredBlob { url, blob_ref: path })
    }

    async fn delete(&self, blob_ref: &str) -> mantra_core::Result<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %blob_ref,
            "deleting blob"
        );

        match self.operator.delete(blob_ref).await {
            Ok(()) => Ok(()),
            // Absent artifacts are fine, the delete is idempotent.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::delete(err.to_string()).into()),
        }
    }
}

/// Replaces path separators and other hostile characters so the original
/// name stays recognizable inside the generated object name.
fn sanitize_file_name(original_name: &str) -> String {
    let sanitized: String = original_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend", &self.config.backend_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FsConfig;

    fn fs_backend(root: &std::path::Path) -> StorageBackend {
        StorageBackend::new(StorageConfig::Fs(FsConfig {
            root: root.display().to_string(),
            public_base_url: "http://localhost:5000".into(),
        }))
        .unwrap()
    }

    #[test]
    fn sanitizes_hostile_names() {
        assert_eq!(sanitize_file_name("notes final.pdf"), "notes_final.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_file_name("algebra-2.tex"), "algebra-2.tex");
        assert_eq!(sanitize_file_name("///"), "file");
    }

    #[tokio::test]
    async fn fs_put_then_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fs_backend(dir.path());

        let stored = backend
            .put(Bytes::from_static(b"payload"), "notes.pdf")
            .await
            .unwrap();

        assert!(stored.blob_ref.ends_with("-notes.pdf"));
        assert!(stored.url.starts_with("http://localhost:5000/uploads/"));
        assert!(stored.url.ends_with(&stored.blob_ref));

        let on_disk = dir.path().join(&stored.blob_ref);
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"payload");

        backend.delete(&stored.blob_ref).await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn fs_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fs_backend(dir.path());

        backend.delete("1700000000000-gone.pdf").await.unwrap();
        backend.delete("1700000000000-gone.pdf").await.unwrap();
    }

    #[test]
    fn s3_urls_carry_the_prefix() {
        let backend_config = StorageConfig::S3(crate::config::S3Config {
            bucket: "docs".into(),
            prefix: "studymantra".into(),
            region: Some("eu-central-1".into()),
            endpoint: None,
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret".into()),
            public_base_url: "https://docs.s3.amazonaws.com/".into(),
        });
        let backend = StorageBackend::new(backend_config).unwrap();

        let (path, url) = backend.locate("1700000000000-notes.pdf");
        assert_eq!(path, "studymantra/1700000000000-notes.pdf");
        assert_eq!(
            url,
            "https://docs.s3.amazonaws.com/studymantra/1700000000000-notes.pdf"
        );
    }
}

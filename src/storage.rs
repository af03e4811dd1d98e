//! Object storage: push a local PNG to an S3-compatible bucket.
//!
//! [`ObjectStore`] is the seam between the dispatcher and the network. The
//! production implementation, [`S3Store`], talks to MinIO (or any S3 API)
//! through `rust-s3`; tests substitute an in-memory store.
//!
//! Every PUT sets `Content-Type: image/png` and a `Content-Length` equal to
//! the file size. Existing objects at the same key are overwritten. Nothing
//! is retried: a failed upload aborts the run.

use crate::config::StorageConfig;
use crate::error::Pdf2SlidesError;
use crate::naming::ObjectKey;
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use std::path::Path;
use tracing::{debug, info};

/// Content type of every uploaded slide.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Destination for rendered pages.
///
/// Implementations are shared across concurrent page tasks behind an `Arc`,
/// so `put_file` takes `&self`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` under `key`, replacing any existing object.
    async fn put_file(&self, path: &Path, key: &ObjectKey) -> Result<(), Pdf2SlidesError>;
}

/// [`ObjectStore`] backed by an S3-compatible endpoint.
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store")
            .field("bucket", &self.bucket.name())
            .field("endpoint", &self.bucket.url())
            .finish()
    }
}

impl S3Store {
    /// Build a client for `config.bucket` on `config.endpoint`.
    ///
    /// Uses path-style addressing (`http://host/bucket/key`), which MinIO
    /// requires. No request is made until the first upload.
    pub fn new(config: &StorageConfig) -> Result<Self, Pdf2SlidesError> {
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| Pdf2SlidesError::StorageNotConfigured {
            hint: format!("invalid credentials: {e}"),
        })?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint_url(),
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| Pdf2SlidesError::StorageNotConfigured {
                hint: format!("bucket '{}': {e}", config.bucket),
            })?
            .with_path_style();

        info!(
            "Object storage: bucket '{}' at {}",
            config.bucket,
            config.endpoint_url()
        );

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_file(&self, path: &Path, key: &ObjectKey) -> Result<(), Pdf2SlidesError> {
        let content = read_upload_body(path, key).await?;

        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), &content, PNG_CONTENT_TYPE)
            .await
            .map_err(|e| Pdf2SlidesError::UploadFailed {
                key: key.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(Pdf2SlidesError::UploadFailed {
                key: key.to_string(),
                detail: format!(
                    "HTTP {}: {}",
                    status,
                    String::from_utf8_lossy(response.as_slice()).trim()
                ),
            });
        }

        debug!("Uploaded {} ({} bytes)", key, content.len());
        Ok(())
    }
}

/// Read the file to upload. The body length is the file's byte size.
async fn read_upload_body(path: &Path, key: &ObjectKey) -> Result<Vec<u8>, Pdf2SlidesError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| Pdf2SlidesError::UploadFailed {
            key: key.to_string(),
            detail: format!("cannot read '{}': {e}", path.display()),
        })?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SessionId;
    use httpmock::MockServer;
    use std::io::Write;

    const SLIDE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-pixels";

    fn store_for(server: &MockServer) -> S3Store {
        let config = StorageConfig::builder()
            .endpoint(server.base_url())
            .access_key("minio")
            .secret_key("minio123")
            .build()
            .unwrap();
        S3Store::new(&config).unwrap()
    }

    fn slide_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SLIDE_BYTES).unwrap();
        file
    }

    fn first_slide() -> ObjectKey {
        ObjectKey::for_slide(&SessionId::parse("abc123").unwrap(), 1)
    }

    fn config() -> StorageConfig {
        StorageConfig::builder()
            .endpoint("localhost:9000")
            .access_key("minio")
            .secret_key("minio123")
            .build()
            .unwrap()
    }

    #[test]
    fn store_builds_without_network() {
        let store = S3Store::new(&config()).expect("client construction is offline");
        let dbg = format!("{store:?}");
        assert!(dbg.contains("storage"), "got: {dbg}");
    }

    #[tokio::test]
    async fn put_is_path_style_png_with_file_length() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/storage/sessions/abc123/slides/slide_001.png")
                    .header("content-type", PNG_CONTENT_TYPE)
                    .header("content-length", SLIDE_BYTES.len().to_string());
                then.status(200).header("ETag", "\"d41d8cd98f00b204e9800998ecf8427e\"");
            })
            .await;

        let file = slide_file();
        store_for(&server)
            .put_file(file.path(), &first_slide())
            .await
            .expect("upload should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_put_is_upload_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT");
                then.status(403).body("<Error><Code>AccessDenied</Code></Error>");
            })
            .await;

        let file = slide_file();
        let err = store_for(&server)
            .put_file(file.path(), &first_slide())
            .await
            .unwrap_err();

        match err {
            Pdf2SlidesError::UploadFailed { key, detail } => {
                assert_eq!(key, "sessions/abc123/slides/slide_001.png");
                assert!(detail.contains("403"), "got: {detail}");
            }
            other => panic!("expected UploadFailed, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_scratch_file_is_upload_error() {
        let store = S3Store::new(&config()).unwrap();
        let key = ObjectKey::for_slide(&SessionId::parse("abc123").unwrap(), 1);

        let err = store
            .put_file(Path::new("/definitely/not/here.png"), &key)
            .await
            .unwrap_err();

        match err {
            Pdf2SlidesError::UploadFailed { key, detail } => {
                assert_eq!(key, "sessions/abc123/slides/slide_001.png");
                assert!(detail.contains("cannot read"), "got: {detail}");
            }
            other => panic!("expected UploadFailed, got {other:?}"),
        }
    }
}

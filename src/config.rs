//! Configuration types for rasterisation and upload.
//!
//! Two structs, two lifetimes:
//!
//! * [`UploadConfig`] controls how a document is rasterised and how many
//!   pages are in flight at once. Built via [`UploadConfig::builder()`].
//! * [`StorageConfig`] describes the S3-compatible endpoint. It is built
//!   once at process start and handed to [`crate::storage::S3Store::new`];
//!   nothing in the library reads the environment on its own.

use crate::error::Pdf2SlidesError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Lowest accepted rendering DPI.
pub const MIN_DPI: u32 = 50;
/// Highest accepted rendering DPI.
pub const MAX_DPI: u32 = 600;

/// DPI used by the single-page tool.
pub const SINGLE_PAGE_DPI: u32 = 300;
/// DPI used when publishing slides.
pub const SLIDE_DPI: u32 = 130;

/// Number of page tasks in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Bucket every slide is written to.
pub const DEFAULT_BUCKET: &str = "storage";
/// Region string sent with signed requests. MinIO accepts any value.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for a multi-page convert-and-upload run.
///
/// # Example
/// ```rust
/// use pdf2slides::UploadConfig;
///
/// let config = UploadConfig::builder()
///     .dpi(150)
///     .concurrency(8)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 150);
/// ```
#[derive(Clone)]
pub struct UploadConfig {
    /// Rendering DPI. Range: 50–600. Default: 130.
    pub dpi: u32,

    /// Number of pages written and uploaded concurrently. Default: 4.
    pub concurrency: usize,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dpi: SLIDE_DPI,
            concurrency: DEFAULT_CONCURRENCY,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("dpi", &self.dpi)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl UploadConfig {
    /// Create a new builder for `UploadConfig`.
    pub fn builder() -> UploadConfigBuilder {
        UploadConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`UploadConfig`].
#[derive(Debug)]
pub struct UploadConfigBuilder {
    config: UploadConfig,
}

impl UploadConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<UploadConfig, Pdf2SlidesError> {
        validate_dpi(self.config.dpi)?;
        if self.config.concurrency == 0 {
            return Err(Pdf2SlidesError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Reject DPI values outside [`MIN_DPI`]..=[`MAX_DPI`].
pub fn validate_dpi(dpi: u32) -> Result<(), Pdf2SlidesError> {
    if !(MIN_DPI..=MAX_DPI).contains(&dpi) {
        return Err(Pdf2SlidesError::InvalidConfig(format!(
            "DPI must be {MIN_DPI}–{MAX_DPI}, got {dpi}"
        )));
    }
    Ok(())
}

// ── Storage ──────────────────────────────────────────────────────────────

/// Connection settings for an S3-compatible object store.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// `host:port`, or a full `http://` / `https://` URL.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Default: `storage`.
    pub bucket: String,
    /// Default: `us-east-1`.
    pub region: String,
    /// Use HTTPS when the endpoint has no explicit scheme. Default: false.
    pub secure: bool,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("secure", &self.secure)
            .finish()
    }
}

impl StorageConfig {
    /// Create a new builder for `StorageConfig`.
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    /// Endpoint as a URL, adding `http://` or `https://` when the configured
    /// value is a bare `host:port`.
    pub fn endpoint_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if self.secure {
            format!("https://{endpoint}")
        } else {
            format!("http://{endpoint}")
        }
    }
}

/// Builder for [`StorageConfig`].
///
/// Endpoint and both keys are required; the rest fall back to
/// [`DEFAULT_BUCKET`], [`DEFAULT_REGION`] and plain HTTP.
#[derive(Debug, Default)]
pub struct StorageConfigBuilder {
    endpoint: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    bucket: Option<String>,
    region: Option<String>,
    secure: bool,
}

impl StorageConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Build the configuration. Blank values count as missing.
    pub fn build(self) -> Result<StorageConfig, Pdf2SlidesError> {
        let endpoint = required(self.endpoint, "MINIO_ENDPOINT")?;
        let access_key = required(self.access_key, "MINIO_ACCESS_KEY")?;
        let secret_key = required(self.secret_key, "MINIO_SECRET_KEY")?;

        Ok(StorageConfig {
            endpoint,
            access_key,
            secret_key,
            bucket: non_blank(self.bucket).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: non_blank(self.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            secure: self.secure,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, var: &str) -> Result<String, Pdf2SlidesError> {
    non_blank(value).ok_or_else(|| Pdf2SlidesError::StorageNotConfigured {
        hint: format!("{var} is not set"),
    })
}

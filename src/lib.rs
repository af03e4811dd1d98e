//! # pdf2slides
//!
//! Rasterise PDF pages to PNG and publish them as slides in S3-compatible
//! object storage.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     check the path is a readable PDF
//!  ├─ 2. Render    rasterise pages via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 3. Encode    DynamicImage → PNG in a scratch dir      ┐ 4 pages
//!  ├─ 4. Upload    PUT sessions/{id}/slides/slide_NNN.png   ┘ at a time
//!  └─ 5. Manifest  ordered [{slideNumber, slideLocation}] as JSON
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2slides::{convert_and_upload, S3Store, StorageConfig, UploadConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = StorageConfig::builder()
//!         .endpoint("localhost:9000")
//!         .access_key("minio")
//!         .secret_key("minio123")
//!         .build()?;
//!     let store = Arc::new(S3Store::new(&storage)?);
//!
//!     let slides = convert_and_upload("deck.pdf", "abc123", store, &UploadConfig::default()).await?;
//!     for slide in &slides {
//!         println!("{} → {}", slide.slide_number, slide.slide_location);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2image` and `pdf2slides` binaries |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod storage;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{StorageConfig, StorageConfigBuilder, UploadConfig, UploadConfigBuilder};
pub use convert::{convert_and_upload, convert_and_upload_sync, pdf_to_image};
pub use error::Pdf2SlidesError;
pub use naming::{ObjectKey, SessionId};
pub use output::{write_error, write_manifest, SavedImage, SlideRecord};
pub use pipeline::render::PageImage;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use storage::{ObjectStore, S3Store};

//! Progress-callback trait for per-page upload events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::UploadConfigBuilder::progress_callback`] to receive
//! events as the dispatcher writes and uploads each page.
//!
//! # Example
//!
//! ```rust
//! use pdf2slides::{ConversionProgressCallback, UploadConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     uploaded: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_uploaded(&self, page_num: usize, total_pages: usize, key: &str) {
//!         self.uploaded.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} → {}", page_num, total_pages, key);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { uploaded: AtomicUsize::new(0) });
//!
//! let config = UploadConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the dispatcher as it processes each page.
///
/// Page tasks run concurrently, so `on_page_start`, `on_page_uploaded` and
/// `on_page_error` may be called from different threads at the same time.
/// All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after rasterisation, before any page task starts.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when a page task starts writing its PNG.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page has been stored under `key`.
    fn on_page_uploaded(&self, page_num: usize, total_pages: usize, key: &str) {
        let _ = (page_num, total_pages, key);
    }

    /// Called when a page task fails. The run aborts right after.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after every page has been uploaded.
    fn on_conversion_complete(&self, total_pages: usize) {
        let _ = total_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::UploadConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

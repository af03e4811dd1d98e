//! Conversion entry points.
//!
//! * [`pdf_to_image`] — one-page PDF → one PNG on local disk.
//! * [`convert_and_upload`] — every page → PNG → object storage, returning
//!   the ordered slide manifest.
//!
//! Both validate the input path before touching pdfium, so a missing file is
//! always reported as [`Pdf2SlidesError::FileNotFound`].

use crate::config::{validate_dpi, UploadConfig};
use crate::dispatch;
use crate::error::Pdf2SlidesError;
use crate::naming::{default_output_path, SessionId};
use crate::output::{SavedImage, SlideRecord};
use crate::pipeline::{encode, input, render};
use crate::storage::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Rasterise a single-page PDF to a PNG file.
///
/// When `output_path` is `None` the image is written next to the input with
/// its extension replaced by `.png`.
///
/// # Errors
/// - [`Pdf2SlidesError::FileNotFound`] if `pdf_path` is not a file
/// - [`Pdf2SlidesError::InvalidPageCount`] if the document does not have
///   exactly one page; no file is written in that case
pub async fn pdf_to_image(
    pdf_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    dpi: u32,
) -> Result<SavedImage, Pdf2SlidesError> {
    let pdf_path = input::validate_pdf_path(pdf_path)?;
    validate_dpi(dpi)?;

    let page = render::render_single_page(&pdf_path, dpi).await?;
    let (width, height) = (page.image.width(), page.image.height());

    let target = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&pdf_path));

    let path = encode::write_png_async(page.image, target).await?;
    info!("Saved {}x{} image to {}", width, height, path.display());

    Ok(SavedImage {
        path,
        width,
        height,
    })
}

/// Rasterise every page of a PDF and upload it under
/// `sessions/{session_id}/slides/slide_{n:03}.png`.
///
/// Returns one [`SlideRecord`] per page, in page order. Scratch PNGs live in
/// a temporary directory that is removed when this function returns, on
/// success and on error alike.
///
/// # Errors
/// Any failure aborts the whole run; no partial manifest is returned.
pub async fn convert_and_upload(
    pdf_path: impl AsRef<Path>,
    session_id: &str,
    store: Arc<dyn ObjectStore>,
    config: &UploadConfig,
) -> Result<Vec<SlideRecord>, Pdf2SlidesError> {
    let total_start = Instant::now();
    let pdf_path = input::validate_pdf_path(pdf_path)?;
    let session = SessionId::parse(session_id)?;
    validate_dpi(config.dpi)?;
    info!(
        "Publishing {} as session {}",
        pdf_path.display(),
        session
    );

    // ── Rasterise ────────────────────────────────────────────────────────
    let render_start = Instant::now();
    let pages = render::render_pages(&pdf_path, config.dpi).await?;
    info!(
        "Rendered {} pages in {}ms",
        pages.len(),
        render_start.elapsed().as_millis()
    );

    let total_pages = pages.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    // ── Write + upload ───────────────────────────────────────────────────
    let scratch = tempfile::Builder::new()
        .prefix("pdf2slides-")
        .tempdir()
        .map_err(|e| Pdf2SlidesError::Internal(format!("Failed to create temp dir: {e}")))?;
    debug!("Scratch directory: {}", scratch.path().display());

    let records = dispatch::dispatch_pages(
        pages,
        &session,
        store,
        scratch.path(),
        config.concurrency,
        config.progress_callback.as_ref(),
    )
    .await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_pages);
    }

    info!(
        "Uploaded {} slides in {}ms",
        records.len(),
        total_start.elapsed().as_millis()
    );

    Ok(records)
}

/// Synchronous wrapper around [`convert_and_upload`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_and_upload_sync(
    pdf_path: impl AsRef<Path>,
    session_id: &str,
    store: Arc<dyn ObjectStore>,
    config: &UploadConfig,
) -> Result<Vec<SlideRecord>, Pdf2SlidesError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2SlidesError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_and_upload(pdf_path, session_id, store, config))
}

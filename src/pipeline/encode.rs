//! Image encoding: `DynamicImage` → PNG file on disk.
//!
//! PNG is lossless, so slide text stays crisp at any DPI. Encoding is
//! CPU-bound; async callers use [`write_png_async`], which moves the work
//! onto tokio's blocking pool.

use crate::error::Pdf2SlidesError;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encode `img` as PNG and write it to `path`, replacing any existing file.
pub fn write_png(img: &DynamicImage, path: &Path) -> Result<(), Pdf2SlidesError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Pdf2SlidesError::ImageWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Wrote {}x{} PNG → {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

/// [`write_png`] on a blocking thread. Takes ownership of the image so it is
/// dropped as soon as it has been written.
pub async fn write_png_async(img: DynamicImage, path: PathBuf) -> Result<PathBuf, Pdf2SlidesError> {
    tokio::task::spawn_blocking(move || write_png(&img, &path).map(|()| path))
        .await
        .map_err(|e| Pdf2SlidesError::Internal(format!("PNG encode task panicked: {}", e)))?
}

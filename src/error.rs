//! Error types for the pdf2slides library.
//!
//! Every failure in the pipeline is fatal: a run either publishes all slides
//! or reports one [`Pdf2SlidesError`]. There is no per-page partial-success
//! path, so a single enum covers input, rasterisation and storage failures.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2slides library.
#[derive(Debug, Error)]
pub enum Pdf2SlidesError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{}' (first bytes: {magic:?})", path.display())]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// Session id would not form a single, well-behaved key segment.
    #[error("Invalid session id '{session_id}': use 1-128 characters from [A-Za-z0-9._-], starting with a letter or digit")]
    InvalidSessionId { session_id: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{}' could not be opened: {detail}", path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// The single-page tool was given a document with some other page count.
    #[error("The PDF must be a single page: '{}' has {found} pages", path.display())]
    InvalidPageCount { path: PathBuf, found: usize },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// A rendered page could not be written as PNG.
    #[error("Failed to write image '{}'", path.display())]
    ImageWriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Storage errors ────────────────────────────────────────────────────
    /// Endpoint or credentials are missing.
    #[error("Object storage is not configured: {hint}")]
    StorageNotConfigured { hint: String },

    /// The storage client rejected or failed the PUT.
    #[error("Upload of '{key}' failed: {detail}")]
    UploadFailed { key: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or install pdfium system-wide."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_message_is_plain() {
        let e = Pdf2SlidesError::FileNotFound {
            path: PathBuf::from("ghost.pdf"),
        };
        assert_eq!(e.to_string(), "PDF file not found: ghost.pdf");
    }

    #[test]
    fn invalid_page_count_display() {
        let e = Pdf2SlidesError::InvalidPageCount {
            path: PathBuf::from("deck.pdf"),
            found: 3,
        };
        let msg = e.to_string();
        assert!(msg.contains("single page"), "got: {msg}");
        assert!(msg.contains("3 pages"), "got: {msg}");
    }

    #[test]
    fn upload_failed_names_key() {
        let e = Pdf2SlidesError::UploadFailed {
            key: "sessions/abc/slides/slide_001.png".into(),
            detail: "HTTP 403".into(),
        };
        assert!(e.to_string().contains("slide_001.png"));
        assert!(e.to_string().contains("403"));
    }

    #[test]
    fn session_id_display() {
        let e = Pdf2SlidesError::InvalidSessionId {
            session_id: "../etc".into(),
        };
        assert!(e.to_string().contains("'../etc'"));
    }
}

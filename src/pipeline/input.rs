//! Input validation: make sure the user-supplied path is a readable PDF.
//!
//! Runs before pdfium is bound so a missing file is reported as
//! [`Pdf2SlidesError::FileNotFound`] instead of an opaque pdfium failure.

use crate::error::Pdf2SlidesError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a local PDF path: must be a regular file, readable, and start
/// with the `%PDF` magic bytes.
pub fn validate_pdf_path(path: impl AsRef<Path>) -> Result<PathBuf, Pdf2SlidesError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
        return Err(Pdf2SlidesError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2SlidesError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2SlidesError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2SlidesError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

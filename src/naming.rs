//! Destination names for rendered pages.
//!
//! The single-page tool writes next to its input; the slide publisher writes
//! to a deterministic object key per `(session, page)`:
//!
//! ```text
//! sessions/{session_id}/slides/slide_{page:03}.png
//! ```
//!
//! Re-running a session overwrites the same keys, so repeated runs never
//! accumulate stale objects.

use crate::error::Pdf2SlidesError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

static RE_SESSION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$").unwrap());

/// A caller-supplied upload session identifier.
///
/// Used verbatim as one path segment of every [`ObjectKey`], so it is
/// restricted to characters that cannot introduce extra segments (`/`, `\`)
/// or relative components (`.`, `..`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, Pdf2SlidesError> {
        let raw = raw.into();
        if RE_SESSION_ID.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(Pdf2SlidesError::InvalidSessionId { session_id: raw })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage key of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key for the 1-indexed `page_num` of `session`.
    pub fn for_slide(session: &SessionId, page_num: usize) -> Self {
        Self(format!(
            "sessions/{}/slides/slide_{:03}.png",
            session.as_str(),
            page_num
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `deck.pdf` → `deck.png`, keeping the directory.
pub fn default_output_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("png")
}

/// Scratch file name for a page inside the run's temp directory.
pub fn scratch_file_name(page_num: usize) -> String {
    format!("slide_{page_num}.png")
}

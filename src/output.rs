//! Output types and the JSON manifest writer.
//!
//! The manifest is the only thing the slide publisher prints to stdout, so
//! callers can pipe it straight into another program:
//!
//! ```text
//! [{"slideNumber":1,"slideLocation":"sessions/abc123/slides/slide_001.png"}, …]
//! ```
//!
//! Failures use the same channel as a single object: `{"error": "<message>"}`.

use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// One uploaded slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRecord {
    /// 1-indexed page number.
    pub slide_number: usize,
    /// Object key the page was stored under.
    pub slide_location: String,
}

/// Result of the single-page conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
}

/// Write `records` as a compact JSON array followed by a newline.
pub fn write_manifest<W: Write>(records: &[SlideRecord], mut writer: W) -> io::Result<()> {
    serde_json::to_writer(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `{"error": message}` followed by a newline.
pub fn write_error<W: Write>(message: &str, mut writer: W) -> io::Result<()> {
    serde_json::to_writer(&mut writer, &ErrorReport { error: message })?;
    writer.write_all(b"\n")?;
    writer.flush()
}

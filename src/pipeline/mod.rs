//! Pipeline stages for PDF-to-PNG conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode ──▶ (storage)
//! (path)    (pdfium)   (PNG file)
//! ```
//!
//! 1. [`input`]  — check the user-supplied path is a readable PDF
//! 2. [`render`] — rasterise pages; runs in `spawn_blocking` because pdfium
//!    is not async-safe
//! 3. [`encode`] — write each `DynamicImage` as a PNG file
//!
//! Uploading and fan-out live in [`crate::storage`] and [`crate::dispatch`].

pub mod encode;
pub mod input;
pub mod render;

//! PDF rasterisation: render pages to `DynamicImage` via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which keeps thread-local
//! state and is not safe to drive from async contexts. Every call here runs
//! inside `tokio::task::spawn_blocking` and owns its own `Pdfium` binding.
//!
//! ## DPI
//!
//! PDF user space is 72 units per inch, so rendering at `dpi` scales every
//! page by `dpi / 72`. A US-letter page at 130 DPI comes out 1105 × 1430 px.

use crate::error::Pdf2SlidesError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rasterised page, owned by whichever task writes it out.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-indexed page number in document order.
    pub page_num: usize,
    pub image: DynamicImage,
}

/// Rasterise every page of a PDF, in document order.
pub async fn render_pages(pdf_path: &Path, dpi: u32) -> Result<Vec<PageImage>, Pdf2SlidesError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || render_pages_blocking(&path, dpi, PageCount::Any))
        .await
        .map_err(|e| Pdf2SlidesError::Internal(format!("Render task panicked: {}", e)))?
}

/// Rasterise a PDF that must contain exactly one page.
///
/// The page count is checked before anything is rendered.
pub async fn render_single_page(pdf_path: &Path, dpi: u32) -> Result<PageImage, Pdf2SlidesError> {
    let path = pdf_path.to_path_buf();

    let mut pages =
        tokio::task::spawn_blocking(move || render_pages_blocking(&path, dpi, PageCount::ExactlyOne))
            .await
            .map_err(|e| Pdf2SlidesError::Internal(format!("Render task panicked: {}", e)))??;

    pages
        .pop()
        .ok_or_else(|| Pdf2SlidesError::Internal("single-page render returned no page".into()))
}

/// Bind to a pdfium library.
///
/// Lookup order: `PDFIUM_LIB_PATH`, then a library in the working
/// directory, then the system library path.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2SlidesError> {
    if let Ok(lib_path) = std::env::var("PDFIUM_LIB_PATH") {
        let lib_path = PathBuf::from(lib_path);
        return Pdfium::bind_to_library(&lib_path)
            .map(Pdfium::new)
            .map_err(|e| {
                Pdf2SlidesError::PdfiumBindingFailed(format!("{}: {}", lib_path.display(), e))
            });
    }

    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| Pdf2SlidesError::PdfiumBindingFailed(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageCount {
    Any,
    ExactlyOne,
}

/// Blocking implementation of page rendering.
fn render_pages_blocking(
    pdf_path: &Path,
    dpi: u32,
    expected: PageCount,
) -> Result<Vec<PageImage>, Pdf2SlidesError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| Pdf2SlidesError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    if expected == PageCount::ExactlyOne && total_pages != 1 {
        return Err(Pdf2SlidesError::InvalidPageCount {
            path: pdf_path.to_path_buf(),
            found: total_pages,
        });
    }

    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale_factor(dpi));

    let mut results = Vec::with_capacity(total_pages);

    for (idx, page) in pages.iter().enumerate() {
        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            Pdf2SlidesError::RasterisationFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        results.push(PageImage {
            page_num: idx + 1,
            image,
        });
    }

    Ok(results)
}

/// pdfium scale factor for a target DPI.
pub(crate) fn scale_factor(dpi: u32) -> f32 {
    dpi as f32 / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_matches_points_per_inch() {
        assert!((scale_factor(72) - 1.0).abs() < f32::EPSILON);
        assert!((scale_factor(144) - 2.0).abs() < f32::EPSILON);
        // 8.5in letter width at 130 DPI
        let width_px = (612.0 * scale_factor(130)).round() as u32;
        assert_eq!(width_px, 1105);
    }
}

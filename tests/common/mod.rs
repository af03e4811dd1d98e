//! Shared helpers for the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use pdf2slides::{ObjectKey, ObjectStore, PageImage, Pdf2SlidesError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

/// In-memory bucket. Keeps the last body written to each key.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<BTreeMap<String, Vec<u8>>>,
    pub puts: Mutex<usize>,
}

impl MemoryStore {
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn put_count(&self) -> usize {
        *self.puts.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_file(&self, path: &Path, key: &ObjectKey) -> Result<(), Pdf2SlidesError> {
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| Pdf2SlidesError::UploadFailed {
                key: key.to_string(),
                detail: e.to_string(),
            })?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body);
        *self.puts.lock().unwrap() += 1;
        Ok(())
    }
}

/// Solid-colour pages numbered 1..=n.
pub fn solid_pages(n: usize) -> Vec<PageImage> {
    (1..=n)
        .map(|page_num| PageImage {
            page_num,
            image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                8,
                6,
                Rgba([(page_num * 40) as u8, 80, 160, 255]),
            )),
        })
        .collect()
}

/// A minimal, well-formed PDF with `pages` blank US-letter pages.
pub fn blank_pdf(pages: usize) -> Vec<u8> {
    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();

    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", i + 3)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages),
    ];
    for _ in 0..pages {
        objects.push("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string());
    }

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for off in offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    out
}

//! Work dispatcher: write and upload every page with bounded concurrency.
//!
//! One task per page: encode the page to `scratch_dir/slide_{n}.png` on a
//! blocking thread, then hand the file to the [`ObjectStore`]. At most
//! `concurrency` tasks are in flight.
//!
//! Tasks finish in any order. Each result is written into a pre-sized slot
//! indexed by the page's position, so the returned records are always in
//! document order and the caller never waits on one particular page while
//! others are already done.

use crate::error::Pdf2SlidesError;
use crate::naming::{scratch_file_name, ObjectKey, SessionId};
use crate::output::SlideRecord;
use crate::pipeline::encode;
use crate::pipeline::render::PageImage;
use crate::progress::ProgressCallback;
use crate::storage::ObjectStore;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Write and upload `pages`, returning one record per page in input order.
///
/// The first failing task aborts the run: pages not yet started are skipped,
/// and tasks already in flight are awaited before the error is returned so
/// no scratch file is written after this function exits.
pub async fn dispatch_pages(
    pages: Vec<PageImage>,
    session: &SessionId,
    store: Arc<dyn ObjectStore>,
    scratch_dir: &Path,
    concurrency: usize,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<SlideRecord>, Pdf2SlidesError> {
    let total_pages = pages.len();
    let mut slots: Vec<Option<SlideRecord>> = vec![None; total_pages];
    let aborted = Arc::new(AtomicBool::new(false));

    let mut tasks = stream::iter(pages.into_iter().enumerate().map(|(slot, page)| {
        let store = Arc::clone(&store);
        let aborted = Arc::clone(&aborted);
        let key = ObjectKey::for_slide(session, page.page_num);
        let scratch_path = scratch_dir.join(scratch_file_name(page.page_num));
        let progress = progress.cloned();

        async move {
            if aborted.load(Ordering::SeqCst) {
                return (slot, None);
            }

            let page_num = page.page_num;
            if let Some(ref cb) = progress {
                cb.on_page_start(page_num, total_pages);
            }

            let result = process_page(page, scratch_path, key, store.as_ref()).await;

            if let Some(ref cb) = progress {
                match &result {
                    Ok(record) => cb.on_page_uploaded(page_num, total_pages, &record.slide_location),
                    Err(e) => cb.on_page_error(page_num, total_pages, &e.to_string()),
                }
            }
            (slot, Some(result))
        }
    }))
    .buffer_unordered(concurrency.max(1));

    let mut first_error = None;
    while let Some((slot, result)) = tasks.next().await {
        match result {
            Some(Ok(record)) => {
                debug!("Page {} stored at {}", record.slide_number, record.slide_location);
                slots[slot] = Some(record);
            }
            Some(Err(e)) if first_error.is_none() => {
                warn!("Aborting run: {}", e);
                aborted.store(true, Ordering::SeqCst);
                first_error = Some(e);
            }
            Some(Err(e)) => debug!("Ignoring error after abort: {}", e),
            None => {}
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(slot, record)| {
            record.ok_or_else(|| {
                Pdf2SlidesError::Internal(format!("page slot {} was never filled", slot + 1))
            })
        })
        .collect()
}

/// Render one page to disk, then upload it.
async fn process_page(
    page: PageImage,
    scratch_path: PathBuf,
    key: ObjectKey,
    store: &dyn ObjectStore,
) -> Result<SlideRecord, Pdf2SlidesError> {
    let path = encode::write_png_async(page.image, scratch_path).await?;
    store.put_file(&path, &key).await?;

    Ok(SlideRecord {
        slide_number: page.page_num,
        slide_location: key.into_string(),
    })
}

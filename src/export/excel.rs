//! Report file output
//!
//! Wraps the shared workbook builder with photo downloads and the final
//! write to disk.

use crate::api::RecordService;
use crate::error::{DashboardError, Result};
use damaged_box_common::export::excel_core::{generate_report_buffer, ImageData, ReportOptions};
use damaged_box_common::DamagedBox;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;

/// Downloaded photos keyed by locator
pub type ImageCache = HashMap<String, Vec<u8>>;

/// Download every photo referenced by `records`, row by row.
///
/// A locator shared by several rows is fetched once. Failures are logged
/// and the locator is simply missing from the result.
pub async fn fetch_images<S>(records: &[DamagedBox], service: &S) -> ImageCache
where
    S: RecordService + ?Sized,
{
    let total: usize = records.iter().map(|r| r.images().count()).sum();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} images {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut cache = ImageCache::new();
    let mut failed = 0usize;

    for record in records {
        for (slot, url) in record.images() {
            progress.set_message(format!("#{} {}", record.id, slot.header()));
            if !cache.contains_key(url) {
                match service.fetch_image(url).await {
                    Ok(bytes) => {
                        cache.insert(url.to_string(), bytes);
                    }
                    Err(e) => {
                        failed += 1;
                        tracing::warn!(id = record.id, "image skipped: {}", e);
                    }
                }
            }
            progress.inc(1);
        }
    }

    progress.finish_and_clear();
    if failed > 0 {
        tracing::warn!("{} image(s) could not be downloaded", failed);
    }
    cache
}

/// Build the workbook and write it to `output_path`
pub fn write_report(
    records: &[DamagedBox],
    options: &ReportOptions,
    images: &ImageCache,
    output_path: &Path,
) -> Result<()> {
    let buffer = generate_report_buffer(records, options, |url| {
        images.get(url).map(|data| ImageData { data: data.clone() })
    })
    .map_err(|e| DashboardError::ExcelGeneration(e.to_string()))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}

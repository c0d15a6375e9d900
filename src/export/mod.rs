pub mod excel;

pub use damaged_box_common::export::excel_core::{report_file_name, ImageMode, ReportOptions};

use crate::api::RecordService;
use crate::error::{DashboardError, Result};
use damaged_box_common::DamagedBox;
use std::path::{Path, PathBuf};

/// Export the given records to `Damaged_Report_<date>.xlsx` under `output_dir`.
///
/// Photos are downloaded one row at a time in embed mode; failed downloads
/// are logged and left out. The file is written only once the workbook is
/// complete, so a failed build leaves nothing on disk.
pub async fn export_report<S>(
    records: &[DamagedBox],
    service: &S,
    options: &ReportOptions,
    output_dir: &Path,
) -> Result<PathBuf>
where
    S: RecordService + ?Sized,
{
    if records.is_empty() {
        return Err(DashboardError::EmptyExport);
    }

    let images = match options.image_mode {
        ImageMode::Embed => excel::fetch_images(records, service).await,
        ImageMode::Hyperlink => Default::default(),
    };

    let output_path = output_dir.join(report_file_name(chrono::Utc::now().date_naive()));
    tracing::info!(
        rows = records.len(),
        mode = %options.image_mode,
        "building report {}",
        output_path.display()
    );
    excel::write_report(records, options, &images, &output_path)?;

    Ok(output_path)
}

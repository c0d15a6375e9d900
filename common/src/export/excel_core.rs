//! Damaged-box report workbook builder
//!
//! Builds the `.xlsx` report from the records currently in view using the
//! column table in `layout.rs`. Image retrieval is left to the caller: the
//! builder only asks `image_loader` for bytes and skips anything it cannot
//! embed, so a broken photo never costs the rest of the row.

use crate::error::Result;
use crate::layout::{
    first_image_col, DATA_COLUMNS, EMPTY_DATE, IMAGE_COL_WIDTH, IMAGE_HEIGHT_PX,
    IMAGE_LINK_LABEL, IMAGE_ROW_HEIGHT_PT, IMAGE_WIDTH_PX, SHEET_NAME,
};
use crate::types::{DamagedBox, ImageSlot};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use rust_xlsxwriter::*;

/// Raw image bytes; the format is detected from the content
pub struct ImageData {
    pub data: Vec<u8>,
}

/// How photo columns are filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageMode {
    /// Clickable "View Image" links; nothing is downloaded
    #[default]
    Hyperlink,
    /// Images fetched and placed inside the row
    Embed,
}

impl std::str::FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hyperlink" | "link" => Ok(ImageMode::Hyperlink),
            "embed" => Ok(ImageMode::Embed),
            _ => Err(format!("Unknown image mode: {}. Use hyperlink or embed", s)),
        }
    }
}

impl std::fmt::Display for ImageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageMode::Hyperlink => write!(f, "hyperlink"),
            ImageMode::Embed => write!(f, "embed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub image_mode: ImageMode,
    /// Offset used to render timestamps that carry their own zone
    pub offset: FixedOffset,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            image_mode: ImageMode::default(),
            offset: Utc.fix(),
        }
    }
}

/// `Damaged_Report_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Damaged_Report_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Render a creation timestamp as `dd/mm/yy HH:MM`.
///
/// Zoned timestamps are shifted to `offset`, naive ones are shown as-is.
/// Missing values give `-`; text that is not a timestamp is returned
/// unchanged.
pub fn format_timestamp(raw: Option<&str>, offset: &FixedOffset) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return EMPTY_DATE.to_string(),
    };

    const DISPLAY: &str = "%d/%m/%y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(offset).format(DISPLAY).to_string();
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%y 00:00").to_string();
    }
    raw.to_string()
}

enum CellValue {
    Number(f64),
    Text(String),
}

fn field_value(record: &DamagedBox, key: &str, offset: &FixedOffset) -> CellValue {
    match key {
        "id" => CellValue::Number(record.id as f64),
        "date" => CellValue::Text(format_timestamp(record.created_at.as_deref(), offset)),
        "asn_no" => CellValue::Text(record.asn_no.clone().unwrap_or_default()),
        "ref_po_doc" => CellValue::Text(record.ref_po_doc.clone()),
        "carton_no" => CellValue::Text(record.carton_no.clone()),
        "of_no" => CellValue::Text(record.of_no.clone()),
        "issue_type" => CellValue::Text(record.issue_type.clone()),
        "barcode" => CellValue::Text(record.barcode.clone()),
        "item_sku" => CellValue::Text(record.item_sku.clone()),
        "qty" => CellValue::Number(record.qty as f64),
        "scan_carton" => CellValue::Text(record.scan_carton.clone()),
        _ => CellValue::Text(String::new()),
    }
}

/// Build the report workbook in memory.
///
/// # Arguments
/// * `records` - rows in display order
/// * `options` - image mode and timestamp offset
/// * `image_loader` - image bytes for a locator (embed mode only); `None` skips the image
pub fn generate_report_buffer<F>(
    records: &[DamagedBox],
    options: &ReportOptions,
    image_loader: F,
) -> Result<Vec<u8>>
where
    F: Fn(&str) -> Option<ImageData>,
{
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let link_format = Format::new()
        .set_font_color(Color::Blue)
        .set_underline(FormatUnderline::Single);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // Header row
    for (col, column) in DATA_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
        if let Some(width) = column.width {
            worksheet.set_column_width(col, width)?;
        }
    }
    for (i, slot) in ImageSlot::ALL.iter().enumerate() {
        let col = first_image_col() + i as u16;
        worksheet.write_string_with_format(0, col, slot.header(), &header_format)?;
        worksheet.set_column_width(col, IMAGE_COL_WIDTH)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;

        for (col, column) in DATA_COLUMNS.iter().enumerate() {
            match field_value(record, column.key, &options.offset) {
                CellValue::Number(n) => worksheet.write_number(row, col as u16, n)?,
                CellValue::Text(s) => worksheet.write_string(row, col as u16, s)?,
            };
        }

        match options.image_mode {
            ImageMode::Hyperlink => {
                for (slot, locator) in record.images() {
                    let col = image_col(slot);
                    let link = Url::new(locator).set_text(IMAGE_LINK_LABEL);
                    let written = worksheet
                        .write_url_with_format(row, col, link, &link_format)
                        .map(|_| ());
                    if let Err(e) = written {
                        tracing::warn!(id = record.id, locator, "image link rejected: {}", e);
                        worksheet.write_string(row, col, locator)?;
                    }
                }
            }
            ImageMode::Embed => {
                worksheet.set_row_height(row, IMAGE_ROW_HEIGHT_PT)?;
                for (slot, locator) in record.images() {
                    let Some(image_data) = image_loader(locator) else {
                        continue;
                    };
                    let image = match Image::new_from_buffer(&image_data.data) {
                        Ok(image) => image,
                        Err(e) => {
                            tracing::warn!(id = record.id, locator, "image not embeddable: {}", e);
                            continue;
                        }
                    };
                    let image = fit_image(image);
                    worksheet.insert_image(row, image_col(slot), &image)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn image_col(slot: ImageSlot) -> u16 {
    let offset = ImageSlot::ALL
        .iter()
        .position(|s| *s == slot)
        .unwrap_or_default() as u16;
    first_image_col() + offset
}

/// Scale an image to the fixed report box
fn fit_image(image: Image) -> Image {
    let (width, height) = (image.width(), image.height());
    if width <= 0.0 || height <= 0.0 {
        return image;
    }
    image
        .set_scale_width(IMAGE_WIDTH_PX as f64 / width)
        .set_scale_height(IMAGE_HEIGHT_PX as f64 / height)
        .set_object_movement(ObjectMovement::MoveAndSizeWithCells)
}

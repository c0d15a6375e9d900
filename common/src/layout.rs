//! Report layout definitions
//!
//! Column order, widths and image geometry for the damaged-box report.
//! The column order is part of the report contract: downstream sheets read
//! columns by position.

/// Worksheet name
pub const SHEET_NAME: &str = "Damaged Boxes";

/// Text shown in hyperlinked image cells
pub const IMAGE_LINK_LABEL: &str = "View Image";

/// Embedded image box (px)
pub const IMAGE_WIDTH_PX: u32 = 100;
pub const IMAGE_HEIGHT_PX: u32 = 100;

/// Row height when images are embedded (pt)
pub const IMAGE_ROW_HEIGHT_PT: f64 = 90.0;

/// Placeholder for a missing timestamp
pub const EMPTY_DATE: &str = "-";

/// Report column definition
#[derive(Debug, Clone, Copy)]
pub struct ReportColumn {
    pub key: &'static str,
    pub header: &'static str,
    /// Excel character width; `None` keeps the default
    pub width: Option<f64>,
}

/// Data columns in report order. Image columns follow these.
pub const DATA_COLUMNS: &[ReportColumn] = &[
    ReportColumn { key: "id", header: "ID", width: None },
    ReportColumn { key: "date", header: "Date", width: Some(20.0) },
    ReportColumn { key: "asn_no", header: "ASN No.", width: Some(15.0) },
    ReportColumn { key: "ref_po_doc", header: "Ref PO", width: Some(15.0) },
    ReportColumn { key: "carton_no", header: "Carton No.", width: Some(12.0) },
    ReportColumn { key: "of_no", header: "OF No.", width: Some(12.0) },
    ReportColumn { key: "issue_type", header: "Issue Type", width: Some(15.0) },
    ReportColumn { key: "barcode", header: "Barcode", width: Some(18.0) },
    ReportColumn { key: "item_sku", header: "Item SKU", width: Some(20.0) },
    ReportColumn { key: "qty", header: "Qty", width: Some(8.0) },
    ReportColumn { key: "scan_carton", header: "Scan Carton", width: Some(15.0) },
];

/// Width of each image column
pub const IMAGE_COL_WIDTH: f64 = 25.0;

/// Column index of the first image column
pub const fn first_image_col() -> u16 {
    DATA_COLUMNS.len() as u16
}

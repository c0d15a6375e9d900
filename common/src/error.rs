//! Error type for the shared library

use thiserror::Error;

/// Errors raised while reading records or building reports
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// Workbook construction or serialization failed
    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias for the shared library
pub type Result<T> = std::result::Result<T, Error>;

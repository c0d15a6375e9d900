use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config error: {0}")]
    Config(String),

    /// List fetch failed; the cause is logged, the message stays generic
    #[error("Unable to retrieve records from the server")]
    Retrieval,

    #[error("Failed to update record {id}: {reason}")]
    UpdateFailed { id: i64, reason: String },

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("No edit in progress")]
    NoEditInProgress,

    #[error("No data to export")]
    EmptyExport,

    #[error("Excel generation error: {0}")]
    ExcelGeneration(String),

    #[error("Image fetch error: {0}")]
    ImageFetch(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Server responded with {0}")]
    Status(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<damaged_box_common::Error> for DashboardError {
    fn from(e: damaged_box_common::Error) -> Self {
        match e {
            damaged_box_common::Error::Io(e) => DashboardError::Io(e),
            damaged_box_common::Error::Json(e) => DashboardError::JsonParse(e),
            damaged_box_common::Error::Config(msg) => DashboardError::Config(msg),
            other => DashboardError::ExcelGeneration(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

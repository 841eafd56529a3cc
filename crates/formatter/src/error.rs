use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Row {row} has {found} values but the report declares {expected} columns")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Value {value} in column '{column}' cannot be represented as a number")]
    NumberOutOfRange { column: String, value: String },

    #[error("JSON rendering failed")]
    Json(#[from] serde_json::Error),

    #[error("XML rendering failed: {0}")]
    Xml(String),

    #[error("Rendered report is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to write report to {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load {what} data from {}", .path.display())]
    Io {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parsing of {what} data failed")]
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error(
        "Invalid {what} record at index {index}{}: {reason}",
        .id.map(|id| format!(" (id {id})")).unwrap_or_default()
    )]
    InvalidRecord {
        what: &'static str,
        index: usize,
        id: Option<i64>,
        reason: String,
    },
}

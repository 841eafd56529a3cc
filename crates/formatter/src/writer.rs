use configuration::OutputFormat;
use core_types::{ReportKind, ReportTable};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FormatError;
use crate::json::render_json;
use crate::xml::render_xml;

/// Renders a report table in the requested format, using the report's own XML tags.
pub fn render(table: &ReportTable, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => render_json(&table.headers, &table.rows),
        OutputFormat::Xml => render_xml(
            &table.headers,
            &table.rows,
            table.kind.root_tag(),
            table.kind.item_tag(),
        ),
    }
}

/// Writes `content` to `path`, replacing any existing file.
pub fn save_report_to_file(path: &Path, content: &str) -> Result<(), FormatError> {
    fs::write(path, content).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders and persists reports into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    format: OutputFormat,
}

impl ReportWriter {
    /// Creates the output directory (and parents) if it does not exist yet.
    pub fn new(directory: impl Into<PathBuf>, format: OutputFormat) -> Result<Self, FormatError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| FormatError::Io {
            path: directory.clone(),
            source,
        })?;
        Ok(Self { directory, format })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// `<directory>/<file stem>.<extension>` for a report.
    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.directory
            .join(format!("{}.{}", kind.file_stem(), self.format.extension()))
    }

    /// Renders `table` and writes it, returning the path written.
    pub fn write(&self, table: &ReportTable) -> Result<PathBuf, FormatError> {
        let content = render(table, self.format)?;
        let path = self.path_for(table.kind);
        save_report_to_file(&path, &content)?;
        tracing::info!(path = %path.display(), rows = table.len(), "Report saved.");
        Ok(path)
    }
}

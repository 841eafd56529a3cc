//! # Report Output
//!
//! Turns a [`core_types::ReportTable`] into JSON or XML text and writes it to
//! disk. Number handling is a serialization concern and lives here: decimal
//! columns ending in `_age`/`_difference` become integers, other decimals
//! become floats (see [`value`]).

pub mod error;
pub mod json;
pub mod value;
pub mod writer;
pub mod xml;

pub use error::FormatError;
pub use json::render_json;
pub use writer::{ReportWriter, render, save_report_to_file};
pub use xml::render_xml;

use core_types::Cell;

/// Every row must carry exactly one value per header.
pub(crate) fn check_columns<S: AsRef<str>>(
    headers: &[S],
    rows: &[Vec<Cell>],
) -> Result<(), FormatError> {
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != headers.len() {
            return Err(FormatError::ColumnMismatch {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }
    }
    Ok(())
}

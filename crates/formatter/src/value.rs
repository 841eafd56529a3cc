//! Column-name driven normalization of report cells.
//!
//! Decimal cells in columns ending in `_age` or `_difference` are emitted as
//! integers (truncated toward zero). Every other decimal becomes a float.
//! Integer and text cells are passed through.

use core_types::Cell;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::FormatError;

const INTEGER_SUFFIXES: [&str; 2] = ["_age", "_difference"];

/// A cell after normalization, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

pub fn is_integer_column(header: &str) -> bool {
    INTEGER_SUFFIXES.iter().any(|suffix| header.ends_with(suffix))
}

pub fn normalize<'a>(header: &str, cell: &'a Cell) -> Result<Scalar<'a>, FormatError> {
    match cell {
        Cell::Int(value) => Ok(Scalar::Int(*value)),
        Cell::Text(value) => Ok(Scalar::Text(value)),
        Cell::Decimal(value) if is_integer_column(header) => value
            .trunc()
            .to_i64()
            .map(Scalar::Int)
            .ok_or_else(|| out_of_range(header, value)),
        Cell::Decimal(value) => value
            .to_f64()
            .map(Scalar::Float)
            .ok_or_else(|| out_of_range(header, value)),
    }
}

fn out_of_range(header: &str, value: &Decimal) -> FormatError {
    FormatError::NumberOutOfRange {
        column: header.to_string(),
        value: value.to_string(),
    }
}

impl Scalar<'_> {
    /// Text form used for XML element content. Whole floats keep one
    /// fractional digit (`20.0`), matching the JSON number form.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 => {
                format!("{value:.1}")
            }
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.to_string(),
        }
    }
}

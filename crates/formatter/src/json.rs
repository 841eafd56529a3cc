use core_types::Cell;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::FormatError;
use crate::value::{Scalar, normalize};

/// One row as a JSON object whose keys keep the header order.
struct JsonRow<'a, S> {
    headers: &'a [S],
    cells: &'a [Cell],
}

impl<S: AsRef<str>> Serialize for JsonRow<'_, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(self.cells) {
            let header = header.as_ref();
            match normalize(header, cell).map_err(Ser::Error::custom)? {
                Scalar::Int(value) => map.serialize_entry(header, &value)?,
                Scalar::Float(value) => map.serialize_entry(header, &value)?,
                Scalar::Text(value) => map.serialize_entry(header, value)?,
            }
        }
        map.end()
    }
}

/// Renders rows as a pretty-printed JSON array of objects (4-space indent, UTF-8 kept as is).
pub fn render_json<S: AsRef<str>>(headers: &[S], rows: &[Vec<Cell>]) -> Result<String, FormatError> {
    crate::check_columns(headers, rows)?;

    let objects: Vec<JsonRow<'_, S>> = rows
        .iter()
        .map(|cells| JsonRow { headers, cells })
        .collect();

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    objects.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf)?)
}

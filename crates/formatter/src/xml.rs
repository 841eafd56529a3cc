use core_types::Cell;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::FormatError;
use crate::value::normalize;

fn xml_error(e: impl std::fmt::Display) -> FormatError {
    FormatError::Xml(e.to_string())
}

/// Renders rows as an indented XML document.
///
/// `root` wraps the whole report and `item` wraps each row; every column
/// becomes a child element named after its header.
pub fn render_xml<S: AsRef<str>>(
    headers: &[S],
    rows: &[Vec<Cell>],
    root: &str,
    item: &str,
) -> Result<String, FormatError> {
    crate::check_columns(headers, rows)?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;

    if rows.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(root)))
            .map_err(xml_error)?;
    } else {
        writer
            .write_event(Event::Start(BytesStart::new(root)))
            .map_err(xml_error)?;

        for cells in rows {
            writer
                .write_event(Event::Start(BytesStart::new(item)))
                .map_err(xml_error)?;
            for (header, cell) in headers.iter().zip(cells) {
                let header = header.as_ref();
                let text = normalize(header, cell)?.to_text();
                writer
                    .create_element(header)
                    .write_text_content(BytesText::from_escaped(partial_escape(&text)))
                    .map_err(xml_error)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(item)))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(root)))
            .map_err(xml_error)?;
    }

    let mut document = String::from_utf8(writer.into_inner())?;
    document.push('\n');
    Ok(document)
}

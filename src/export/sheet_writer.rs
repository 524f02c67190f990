//! Generates the worksheet XML for the upload sheet.
//!
//! Cells use inline strings (`t="inlineStr"`) so no shared string table is
//! needed. Every row carries exactly one `<c>` per schema column; an empty
//! value is written as a value-less cell.

use crate::cell_ref::{cell_ref, col_to_letter};
use crate::error::{ContentSheetError, Result};
use crate::types::{Record, Schema};
use crate::xml_helpers::{escape_cell_text, needs_space_preserve};

/// `cellXfs` index of the header style (font with bold explicitly off).
pub(crate) const HEADER_STYLE: u32 = 1;

/// Excel worksheet limits.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Counts reported back to the caller for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SheetStats {
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    /// Characters removed because XML cannot carry them
    pub(crate) dropped_chars: usize,
}

/// Write a complete worksheet XML string: header row, then one row per record.
pub(crate) fn write_sheet_xml(records: &[Record], schema: &Schema) -> Result<(String, SheetStats)> {
    let total_rows = records.len().saturating_add(1);
    if total_rows > MAX_ROWS {
        return Err(ContentSheetError::Limit(format!(
            "{} records exceed the worksheet row limit",
            records.len()
        )));
    }
    if schema.len() > MAX_COLS {
        return Err(ContentSheetError::Limit(format!(
            "{} columns exceed the worksheet column limit",
            schema.len()
        )));
    }
    let rows = u32::try_from(total_rows).map_err(|e| ContentSheetError::Limit(e.to_string()))?;
    let cols = u32::try_from(schema.len()).map_err(|e| ContentSheetError::Limit(e.to_string()))?;
    let mut stats = SheetStats {
        rows,
        cols,
        dropped_chars: 0,
    };

    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    // <dimension>
    let end_col = col_to_letter(cols.saturating_sub(1));
    out.push_str(&format!("<dimension ref=\"A1:{end_col}{rows}\"/>\n"));

    out.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\"/></sheetViews>\n");
    out.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>\n");

    // <sheetData>
    out.push_str("<sheetData>\n");
    out.push_str("<row r=\"1\">");
    for (col, header) in (0u32..).zip(schema.headers()) {
        stats.dropped_chars += write_cell(&mut out, 0, col, &header, Some(HEADER_STYLE));
    }
    out.push_str("</row>\n");

    for (row, record) in (1u32..).zip(records) {
        out.push_str(&format!("<row r=\"{}\">", row + 1));
        for (col, column) in (0u32..).zip(schema.columns()) {
            let value = record.get(&column.name).unwrap_or("");
            stats.dropped_chars += write_cell(&mut out, row, col, value, None);
        }
        out.push_str("</row>\n");
    }
    out.push_str("</sheetData>\n");

    out.push_str(
        "<pageMargins left=\"0.75\" right=\"0.75\" top=\"1\" bottom=\"1\" header=\"0.5\" footer=\"0.5\"/>\n",
    );
    out.push_str("</worksheet>");
    Ok((out, stats))
}

/// Write a single `<c>` element. Returns the number of characters dropped.
fn write_cell(out: &mut String, row: u32, col: u32, text: &str, style: Option<u32>) -> usize {
    out.push_str(&format!("<c r=\"{}\"", cell_ref(row, col)));

    if let Some(si) = style {
        out.push_str(&format!(" s=\"{si}\""));
    }

    if text.is_empty() {
        out.push_str("/>");
        return 0;
    }

    let (escaped, dropped) = escape_cell_text(text);
    out.push_str(" t=\"inlineStr\"><is>");
    if needs_space_preserve(text) {
        out.push_str("<t xml:space=\"preserve\">");
    } else {
        out.push_str("<t>");
    }
    out.push_str(&escaped);
    out.push_str("</t></is></c>");
    dropped
}

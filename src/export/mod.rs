//! XLSX export pipeline.
//!
//! Produces a single-sheet workbook: the header row in schema order, then one
//! row per record in input order. Nothing is written to disk; the caller gets
//! the complete file as bytes.

pub(crate) mod package;
pub(crate) mod sheet_writer;

use crate::error::{ContentSheetError, Result};
use crate::types::{Record, Schema};

/// Sheet name expected by the upload importer.
pub const DEFAULT_SHEET_NAME: &str = "Content";

/// MIME type of the produced file.
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Characters Excel forbids in sheet names.
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Export records to XLSX bytes on a sheet named `Content`.
///
/// Fields missing from a record become empty cells; an empty `records`
/// slice yields a header-only workbook.
///
/// # Errors
/// Returns an error only if the package itself cannot be assembled, or the
/// record count exceeds the worksheet row limit.
pub fn export_workbook(records: &[Record], schema: &Schema) -> Result<Vec<u8>> {
    export_workbook_named(records, schema, DEFAULT_SHEET_NAME)
}

/// [`export_workbook`] with a caller-chosen sheet name.
///
/// # Errors
/// Also fails if `sheet_name` breaks Excel's naming rules.
pub fn export_workbook_named(
    records: &[Record],
    schema: &Schema,
    sheet_name: &str,
) -> Result<Vec<u8>> {
    validate_sheet_name(sheet_name)?;

    let (xml, stats) = sheet_writer::write_sheet_xml(records, schema)?;
    if stats.dropped_chars > 0 {
        tracing::warn!(
            dropped = stats.dropped_chars,
            "removed characters that cannot be stored in a worksheet"
        );
    }

    let bytes = package::write_package(sheet_name, &xml)?;
    tracing::debug!(
        rows = stats.rows,
        cols = stats.cols,
        bytes = bytes.len(),
        sheet = sheet_name,
        "workbook exported"
    );
    Ok(bytes)
}

/// Check a worksheet name against Excel's rules: 1 to 31 characters, none of
/// `[ ] : * ? / \`, and no leading or trailing apostrophe.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > 31 {
        return Err(ContentSheetError::SheetName(format!(
            "'{name}' must be 1 to 31 characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(ContentSheetError::SheetName(format!(
            "'{name}' contains forbidden character '{c}'"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ContentSheetError::SheetName(format!(
            "'{name}' cannot begin or end with an apostrophe"
        )));
    }
    Ok(())
}

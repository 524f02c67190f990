//! Normalize-then-export entry point used by the CLI and the WASM bindings.

use serde::{Deserialize, Serialize};

use crate::config::UploadConfig;
use crate::error::Result;
use crate::export::{export_workbook_named, XLSX_MIME_TYPE};
use crate::normalize::{normalize_record, FieldWarning};
use crate::types::Record;

/// A field warning located in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWarning {
    /// Zero-based position of the record in the input
    pub record: usize,
    #[serde(flatten)]
    pub warning: FieldWarning,
}

/// A finished workbook plus what the front end needs to offer it for download.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub warnings: Vec<RecordWarning>,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Normalize every record and collect the warnings, without exporting.
///
/// Warnings are only traced at debug level; reporting them to the user is
/// left to the caller.
pub fn prepare_records(records: &[Record]) -> (Vec<Record>, Vec<RecordWarning>) {
    let mut normalized = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let (clean, found) = normalize_record(record);
        for warning in found {
            tracing::debug!(record = idx, field = %warning.field, value = %warning.original, "{warning}");
            warnings.push(RecordWarning {
                record: idx,
                warning,
            });
        }
        normalized.push(clean);
    }

    (normalized, warnings)
}

/// Normalize and export `records` according to `config`.
///
/// Data problems never fail the export; they come back as warnings.
///
/// # Errors
/// Fails if the configuration is invalid or the workbook cannot be assembled.
pub fn build_upload(records: &[Record], config: &UploadConfig) -> Result<Upload> {
    config.validate()?;

    let (normalized, warnings) = prepare_records(records);
    let bytes = export_workbook_named(&normalized, &config.columns, &config.sheet_name)?;

    tracing::info!(
        records = normalized.len(),
        warnings = warnings.len(),
        file = %config.file_name,
        "upload workbook built"
    );

    Ok(Upload {
        bytes,
        warnings,
        file_name: config.file_name.clone(),
        mime_type: XLSX_MIME_TYPE,
    })
}

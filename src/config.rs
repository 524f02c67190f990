//! Upload configuration: which columns to export and how to name the output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::export::{validate_sheet_name, DEFAULT_SHEET_NAME};
use crate::types::Schema;

/// Suggested download name for the generated workbook.
pub const DEFAULT_FILE_NAME: &str = "expedia_content_upload.xlsx";

/// Settings for one upload export. Every field has a default, so `{}` is a
/// valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadConfig {
    /// Export columns in order
    pub columns: Schema,
    pub sheet_name: String,
    pub file_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            columns: Schema::upload(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl UploadConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// Fails on malformed JSON, an invalid column list, or a bad sheet name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    ///
    /// # Errors
    /// Fails if the file cannot be read or does not validate.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Columns are validated when deserialized; this covers the rest.
    ///
    /// # Errors
    /// Fails if the sheet name breaks Excel's naming rules.
    pub fn validate(&self) -> Result<()> {
        validate_sheet_name(&self.sheet_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ContentSheetError;

    #[test]
    fn test_empty_object_is_default() {
        let config = UploadConfig::from_json_str("{}").unwrap();
        assert_eq!(config, UploadConfig::default());
        assert_eq!(config.columns.len(), 36);
        assert_eq!(config.sheet_name, "Content");
        assert_eq!(config.file_name, "expedia_content_upload.xlsx");
    }

    #[test]
    fn test_custom_columns_and_names() {
        let config = UploadConfig::from_json_str(
            r#"{"columns": ["NAME (*)", "BODY"], "sheetName": "Drafts", "fileName": "drafts.xlsx"}"#,
        )
        .unwrap();
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.sheet_name, "Drafts");
        assert_eq!(config.file_name, "drafts.xlsx");
    }

    #[test]
    fn test_rejects_bad_sheet_name() {
        let err = UploadConfig::from_json_str(r#"{"sheetName": "a:b"}"#).unwrap_err();
        assert!(matches!(err, ContentSheetError::SheetName(_)));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = UploadConfig::from_json_str(r#"{"columns": ["A", "A (*)"]}"#).unwrap_err();
        assert!(matches!(err, ContentSheetError::Json(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(UploadConfig::from_json_str(r#"{"sheet": "x"}"#).is_err());
    }
}

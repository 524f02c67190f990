//! Structured error types for contentsheet.
//!
//! Data-quality problems in records never surface here; these are the
//! faults that stop a workbook from being produced at all.

/// All errors that can occur while configuring or building an upload workbook.
#[derive(Debug, thiserror::Error)]
pub enum ContentSheetError {
    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON input or configuration could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Column schema is empty or names a field twice.
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// Worksheet name rejected by Excel naming rules.
    #[error("Invalid sheet name: {0}")]
    SheetName(String),

    /// Input exceeds what a worksheet can hold.
    #[error("Worksheet limit: {0}")]
    Limit(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors at the binding boundary.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ContentSheetError>;

impl From<String> for ContentSheetError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ContentSheetError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ContentSheetError> for wasm_bindgen::JsValue {
    fn from(e: ContentSheetError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

//! contentsheet - upload workbook builder for travel content
//!
//! Takes the records a content-entry form collects and produces the XLSX the
//! upload importer expects:
//! - `BODY` markup with quote-wrapped `href` values repaired
//! - `POS_LOCALES` codes recased (`expedia.en_us` → `EXPEDIA.en_US`)
//! - `PUBLISHABLE` coerced to `true`/`false`, with a warning otherwise
//! - one `Content` sheet, 36 fixed columns, plain (non-bold) header row
//!
//! # Usage (Rust)
//!
//! ```rust
//! use contentsheet::{build_upload, Record, UploadConfig};
//!
//! let records = vec![Record::new()
//!     .with("NAME", "Paris Guide")
//!     .with("POS_LOCALES", "expedia.en_us")
//!     .with("PUBLISHABLE", "TRUE")];
//! let upload = build_upload(&records, &UploadConfig::default()).unwrap();
//! assert!(upload.warnings.is_empty());
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { buildUploadXlsx } from 'contentsheet';
//! await init();
//! const bytes = buildUploadXlsx([{ NAME: 'Paris Guide', PUBLISHABLE: 'true' }]);
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod xml_helpers;

use wasm_bindgen::prelude::*;

pub use config::UploadConfig;
pub use error::{ContentSheetError, Result};
pub use export::{export_workbook, XLSX_MIME_TYPE};
pub use pipeline::{build_upload, prepare_records, RecordWarning, Upload};
pub use types::*;

fn records_from_js(records: JsValue) -> std::result::Result<Vec<Record>, JsValue> {
    serde_wasm_bindgen::from_value(records)
        .map_err(|e| JsValue::from_str(&format!("Invalid records: {e}")))
}

/// Normalize records and export them with the default upload settings.
///
/// # Arguments
/// * `records` - An array of objects mapping field names to values
///
/// # Returns
/// The XLSX file bytes (a `Uint8Array` in JavaScript)
///
/// # Errors
/// Returns an error if `records` is not an array of objects or the workbook
/// cannot be assembled.
#[wasm_bindgen(js_name = "buildUploadXlsx")]
pub fn build_upload_xlsx(records: JsValue) -> std::result::Result<Vec<u8>, JsValue> {
    console_error_panic_hook::set_once();
    let records = records_from_js(records)?;
    let upload = build_upload(&records, &UploadConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(upload.bytes)
}

/// Validation warnings the form should show before offering the download.
///
/// # Errors
/// Returns an error if `records` is not an array of objects.
#[wasm_bindgen(js_name = "uploadWarnings")]
pub fn upload_warnings(records: JsValue) -> std::result::Result<JsValue, JsValue> {
    let records = records_from_js(records)?;
    let (_, warnings) = prepare_records(&records);
    serde_wasm_bindgen::to_value(&warnings)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Repair quote-wrapped `href` values in rich-text markup.
#[must_use]
#[wasm_bindgen(js_name = "normalizeMarkup")]
pub fn normalize_markup_js(html: &str) -> String {
    normalize::normalize_markup(html)
}

/// Recase a point-of-sale locale code.
#[must_use]
#[wasm_bindgen(js_name = "normalizeLocale")]
pub fn normalize_locale_js(value: &str) -> String {
    normalize::normalize_locale(value)
}

/// Coerce a publishable flag; returns `{ value, warning? }`.
///
/// # Errors
/// Returns an error if the result cannot be converted to a JS object.
#[wasm_bindgen(js_name = "normalizePublishable")]
pub fn normalize_publishable_js(value: &str) -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&normalize::normalize_publishable(value))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Header texts of the default upload schema, in column order.
#[must_use]
#[wasm_bindgen(js_name = "defaultColumns")]
pub fn default_columns() -> Vec<String> {
    Schema::upload().headers().collect()
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

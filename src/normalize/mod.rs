//! Field normalization applied to every record before export.
//!
//! Three field classes are cleaned:
//! - `BODY` markup: quote characters stripped from `href` values
//! - `POS_LOCALES`: `expedia.en_us` style codes recased to `EXPEDIA.en_US`
//! - `PUBLISHABLE`: coerced to `"true"` / `"false"`
//!
//! None of these fail. Bad input is passed through or replaced with a safe
//! default, and the caller receives a [`FieldWarning`] where a user should
//! be told.

mod locale;
mod markup;
mod publishable;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{fields, Record};

pub use locale::normalize_locale;
pub use markup::{fix_markup, normalize_markup};
pub use publishable::normalize_publishable;

/// Non-fatal validation problem found while normalizing a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    /// Canonical field name
    pub field: String,
    /// Value as entered
    pub original: String,
    /// Value written to the sheet instead
    pub replacement: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} value '{}'; defaulting to '{}'",
            self.field, self.original, self.replacement
        )
    }
}

/// Result of a normalizer that may need to tell the user something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<FieldWarning>,
}

impl Normalized {
    pub(crate) fn clean(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            warning: None,
        }
    }
}

/// Normalize the `BODY`, `POS_LOCALES` and `PUBLISHABLE` fields of a record.
///
/// Fields missing from the record stay missing; every other field is copied
/// untouched. A record without `PUBLISHABLE` therefore exports a blank cell
/// rather than `"false"`, and produces no warning: required values are never
/// filled in on the user's behalf.
pub fn normalize_record(record: &Record) -> (Record, Vec<FieldWarning>) {
    let mut out = record.clone();
    let mut warnings = Vec::new();

    if let Some(body) = out.get_mut(fields::BODY) {
        *body = normalize_markup(body);
    }
    if let Some(locales) = out.get_mut(fields::POS_LOCALES) {
        *locales = normalize_locale(locales);
    }
    if let Some(flag) = out.get_mut(fields::PUBLISHABLE) {
        let normalized = normalize_publishable(flag);
        *flag = normalized.value;
        warnings.extend(normalized.warning);
    }

    (out, warnings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_record_touches_three_fields() {
        let record = Record::new()
            .with("NAME", "  Paris Guide ")
            .with("BODY", r#"<a href=\"http://x\">x</a>"#)
            .with("POS_LOCALES (*)", "expedia.en_us")
            .with("PUBLISHABLE (*)", "maybe")
            .with("TITLE", "expedia.en_us");

        let (out, warnings) = normalize_record(&record);

        assert_eq!(out.get("NAME"), Some("  Paris Guide "));
        assert_eq!(out.get("BODY"), Some(r#"<a href="http://x">x</a>"#));
        assert_eq!(out.get("POS_LOCALES"), Some("EXPEDIA.en_US"));
        assert_eq!(out.get("PUBLISHABLE"), Some("false"));
        // Only POS_LOCALES is recased
        assert_eq!(out.get("TITLE"), Some("expedia.en_us"));

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "PUBLISHABLE");
        assert_eq!(warnings[0].original, "maybe");
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let record = Record::new().with("NAME", "Rome");
        let (out, warnings) = normalize_record(&record);
        assert_eq!(out, record);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_warning_display() {
        let w = FieldWarning {
            field: "PUBLISHABLE".into(),
            original: "yes".into(),
            replacement: "false".into(),
        };
        assert_eq!(
            w.to_string(),
            "Invalid PUBLISHABLE value 'yes'; defaulting to 'false'"
        );
    }
}

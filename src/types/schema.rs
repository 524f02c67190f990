use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::record::{canonical_field, REQUIRED_MARKER};
use crate::error::{ContentSheetError, Result};

/// Columns of the content upload sheet, in export order.
///
/// The flag marks required columns; the upload format shows them with a
/// trailing `(*)` in the header row.
pub const UPLOAD_COLUMNS: [(&str, bool); 36] = [
    ("CONTENT_ID", false),
    ("NAME", true),
    ("CONTENT_TYPE", true),
    ("POS_LOCALES", true),
    ("PUBLISHABLE", true),
    ("TITLE", true),
    ("SUBTITLE", false),
    ("HEADLINE", false),
    ("SUMMARY", false),
    ("BODY", false),
    ("CALL_TO_ACTION_TEXT", false),
    ("CALL_TO_ACTION_URL", false),
    ("IMAGE_URL", false),
    ("IMAGE_ALT_TEXT", false),
    ("IMAGE_CREDIT", false),
    ("VIDEO_URL", false),
    ("DESTINATION_NAME", false),
    ("DESTINATION_ID", false),
    ("REGION_ID", false),
    ("COUNTRY_CODE", false),
    ("CITY", false),
    ("LATITUDE", false),
    ("LONGITUDE", false),
    ("CATEGORY", false),
    ("TAGS", false),
    ("THEME", false),
    ("TRAVELER_TYPE", false),
    ("SEASON", false),
    ("START_DATE", false),
    ("END_DATE", false),
    ("AUTHOR", false),
    ("SOURCE", false),
    ("SEO_TITLE", false),
    ("SEO_DESCRIPTION", false),
    ("CANONICAL_URL", false),
    ("NOTES", false),
];

/// A single export column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Canonical field name used to look up record values
    pub name: String,
    /// Required columns are marked in the header but not enforced
    #[serde(default)]
    pub required: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }

    /// Parse a header-style name; `"NAME (*)"` yields a required `NAME` column.
    pub fn from_header(header: &str) -> Self {
        let required = header.trim_end().ends_with(REQUIRED_MARKER);
        Self::new(canonical_field(header), required)
    }

    /// Text written to the header row.
    pub fn header(&self) -> String {
        if self.required {
            format!("{} {}", self.name, REQUIRED_MARKER)
        } else {
            self.name.clone()
        }
    }
}

/// Column entry as written in configuration: a header string or an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Header(String),
    Column(Column),
}

/// Ordered, duplicate-free list of export columns.
///
/// Every exported row has exactly these columns in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema, rejecting empty column lists and repeated fields.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ContentSheetError::Schema("no columns defined".into()));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if col.name.is_empty() {
                return Err(ContentSheetError::Schema("empty column name".into()));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(ContentSheetError::Schema(format!(
                    "duplicate column '{}'",
                    col.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Build a schema from header-style names (see [`Column::from_header`]).
    pub fn from_headers<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            headers
                .into_iter()
                .map(|h| Column::from_header(h.as_ref()))
                .collect(),
        )
    }

    /// The 36-column content upload schema.
    #[must_use]
    pub fn upload() -> Self {
        Self {
            columns: UPLOAD_COLUMNS
                .iter()
                .map(|&(name, required)| Column::new(name, required))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = String> + '_ {
        self.columns.iter().map(Column::header)
    }

    /// Zero-based position of a field, accepting header-style names.
    pub fn position(&self, field: &str) -> Option<usize> {
        let field = canonical_field(field);
        self.columns.iter().position(|c| c.name == field)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::upload()
    }
}

impl TryFrom<Vec<ColumnSpec>> for Schema {
    type Error = ContentSheetError;

    fn try_from(specs: Vec<ColumnSpec>) -> Result<Self> {
        Self::new(
            specs
                .into_iter()
                .map(|spec| match spec {
                    ColumnSpec::Header(h) => Column::from_header(&h),
                    ColumnSpec::Column(mut c) => {
                        c.name = canonical_field(&c.name).to_string();
                        c
                    }
                })
                .collect(),
        )
    }
}

impl From<Schema> for Vec<ColumnSpec> {
    fn from(schema: Schema) -> Self {
        schema.columns.into_iter().map(ColumnSpec::Column).collect()
    }
}

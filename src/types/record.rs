use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker the upload sheet appends to required column headers.
pub const REQUIRED_MARKER: &str = "(*)";

/// Field names the normalizer acts on.
pub mod fields {
    pub const BODY: &str = "BODY";
    pub const POS_LOCALES: &str = "POS_LOCALES";
    pub const PUBLISHABLE: &str = "PUBLISHABLE";
}

/// One content entry collected by the form front end.
///
/// Keys are canonical field names (`"POS_LOCALES"`, never `"POS_LOCALES (*)"`).
/// An empty string is a legitimate "unset" value; a missing key is simply
/// absent and exports as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>", into = "BTreeMap<String, String>")]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, canonicalizing a header-style key such as `"NAME (*)"`.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.fields
            .insert(canonical_field(key.as_ref()).to_string(), value.into());
    }

    /// Builder-style [`Record::insert`].
    #[must_use]
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(canonical_field(field))
            .map(String::as_str)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(canonical_field(field))
    }

    /// Mutable access to an existing value, used by the normalizer to
    /// rewrite fields in place.
    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut String> {
        self.fields.get_mut(canonical_field(field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// JSON objects from the front end may carry numbers or booleans for
/// string fields; they are kept as their textual form. `null` means absent.
impl From<BTreeMap<String, serde_json::Value>> for Record {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in raw {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            record.insert(key, text);
        }
        record
    }
}

impl From<Record> for BTreeMap<String, String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Strip the required-column marker from a header-style key.
///
/// `"POS_LOCALES (*)"` and `" POS_LOCALES "` both become `"POS_LOCALES"`.
pub fn canonical_field(key: &str) -> &str {
    let key = key.trim();
    key.strip_suffix(REQUIRED_MARKER)
        .map_or(key, str::trim_end)
}

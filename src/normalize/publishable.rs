//! `PUBLISHABLE` flag coercion.

use super::{FieldWarning, Normalized};
use crate::types::fields;

/// Value substituted for anything that is not a recognizable boolean.
pub const PUBLISHABLE_DEFAULT: &str = "false";

/// Coerce a publishable flag to `"true"` or `"false"`.
///
/// Surrounding whitespace and case are ignored. Anything else becomes
/// `"false"` and carries a warning naming the value that was entered.
pub fn normalize_publishable(value: &str) -> Normalized {
    let flag = value.trim().to_lowercase();
    match flag.as_str() {
        "true" | "false" => Normalized::clean(flag),
        _ => Normalized {
            value: PUBLISHABLE_DEFAULT.to_string(),
            warning: Some(FieldWarning {
                field: fields::PUBLISHABLE.to_string(),
                original: value.to_string(),
                replacement: PUBLISHABLE_DEFAULT.to_string(),
            }),
        },
    }
}

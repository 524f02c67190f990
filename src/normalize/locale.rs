//! Point-of-sale locale recasing.

/// Recase a `<site>.<language>_<territory>` code: `expedia.en_us` → `EXPEDIA.en_US`.
///
/// Values without a `.`, or whose part after the first `.` does not split
/// into exactly two pieces on `_`, are returned unchanged.
pub fn normalize_locale(value: &str) -> String {
    let Some((site, locale)) = value.split_once('.') else {
        return value.to_string();
    };

    let mut parts = locale.split('_');
    let (Some(language), Some(territory), None) = (parts.next(), parts.next(), parts.next())
    else {
        return value.to_string();
    };

    format!(
        "{}.{}_{}",
        site.to_uppercase(),
        language.to_lowercase(),
        territory.to_uppercase()
    )
}

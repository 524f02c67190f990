//! Excel-style cell references for the worksheet writer.

/// Convert a 0-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col.saturating_add(1); // Convert to 1-based
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Build an `A1`-style reference from 0-indexed row and column.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), row.saturating_add(1))
}

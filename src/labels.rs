//! Row and column label encoding.
//!
//! Rows are numbered 1-based. Columns use an alphabetic scheme: `A`..`Z` for
//! the first 26 columns, then two-letter markers. The two-letter step is
//! deliberately *not* spreadsheet-style bijective base-26: the first letter
//! is `(index / 26) - 1`, so 26 -> "AA", 51 -> "AZ", 52 -> "BA". Downstream
//! consumers rely on these exact strings, so the formula must not be
//! "corrected".

/// Label text for the horizontal line with the given 0-based index.
pub fn row_label(index: usize) -> String {
    (index + 1).to_string()
}

/// Label text for the vertical line with the given 0-based index.
///
/// The two-letter range covers indices up to 701; beyond that the first
/// letter walks off the end of the alphabet, same as the scheme it encodes.
pub fn column_label(index: usize) -> String {
    if index < 26 {
        ((b'A' + index as u8) as char).to_string()
    } else {
        let first = (65 + index / 26 - 1) as u8 as char;
        let second = (b'A' + (index % 26) as u8) as char;
        format!("{first}{second}")
    }
}

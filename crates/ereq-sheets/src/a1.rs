//! A1 notation helpers.
//!
//! Column letters follow spreadsheet convention (0 → `A`, 25 → `Z`,
//! 26 → `AA`). Rows are 1-based; row 1 of every tab is its header.

/// Spreadsheet column letter for a zero-based column index.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        // n % 26 < 26, so the byte stays within 'A'..='Z'.
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Sheet-row number of a zero-based data index (the header occupies row 1).
#[must_use]
pub const fn data_row_number(index: usize) -> usize {
    index + 2
}

/// Quote a tab name for use in a range when it needs it.
///
/// Names that start with a letter, hold only ASCII letters, digits and
/// underscores, and cannot be read as a cell reference are left bare.
/// Everything else is wrapped in single quotes with embedded quotes doubled.
#[must_use]
pub fn quote_sheet_name(name: &str) -> String {
    let bare = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !looks_like_cell(name);
    if bare {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// `Q1`, `AB12` (A1 style) or `R1C1` (R1C1 style).
fn looks_like_cell(name: &str) -> bool {
    let digits_only = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    let split = name
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(name.len());
    let (letters, rest) = name.split_at(split);
    if letters.chars().all(|c| c.is_ascii_alphabetic()) && digits_only(rest) {
        return true;
    }

    let upper = name.to_ascii_uppercase();
    upper
        .strip_prefix('R')
        .and_then(|rest| rest.split_once('C'))
        .is_some_and(|(row, col)| digits_only(row) && digits_only(col))
}

/// `Sheet!<cells>` with the tab name quoted as needed.
#[must_use]
pub fn range(sheet: &str, cells: &str) -> String {
    format!("{}!{cells}", quote_sheet_name(sheet))
}

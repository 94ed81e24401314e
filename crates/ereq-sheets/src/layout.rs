//! Where each dataset lives inside the spreadsheet.

use crate::a1::{column_letter, range};

/// Widest record range read in one call (`A1:ZZ`, 702 columns).
const RECORDS_READ_CELLS: &str = "A1:ZZ";

/// Tab names of the three datasets the manager works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub records_sheet: String,
    pub audit_sheet: String,
    pub access_sheet: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            records_sheet: "Entry Requirements".into(),
            audit_sheet: "Changelog".into(),
            access_sheet: "Access".into(),
        }
    }
}

impl SheetLayout {
    /// Header plus every data row of the records tab.
    #[must_use]
    pub fn records_range(&self) -> String {
        range(&self.records_sheet, RECORDS_READ_CELLS)
    }

    /// One full record row, columns `A` through the last schema column.
    ///
    /// `row` is the 1-based sheet row (see [`crate::a1::data_row_number`]).
    #[must_use]
    pub fn record_row_range(&self, row: usize, columns: usize) -> String {
        let last = column_letter(columns.saturating_sub(1));
        range(&self.records_sheet, &format!("A{row}:{last}{row}"))
    }

    /// A single record cell.
    #[must_use]
    pub fn record_cell_range(&self, row: usize, column: usize) -> String {
        range(&self.records_sheet, &format!("{}{row}", column_letter(column)))
    }

    /// Changelog rows below the header.
    #[must_use]
    pub fn audit_read_range(&self) -> String {
        range(&self.audit_sheet, "A2:G")
    }

    /// Target of changelog appends.
    #[must_use]
    pub fn audit_append_range(&self) -> String {
        range(&self.audit_sheet, "A:G")
    }

    /// Column A of the allow-list tab.
    #[must_use]
    pub fn access_range(&self) -> String {
        range(&self.access_sheet, "A:A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_ranges() {
        let layout = SheetLayout::default();
        assert_eq!(layout.records_range(), "'Entry Requirements'!A1:ZZ");
        assert_eq!(layout.audit_read_range(), "Changelog!A2:G");
        assert_eq!(layout.audit_append_range(), "Changelog!A:G");
        assert_eq!(layout.access_range(), "Access!A:A");
    }

    #[test]
    fn record_row_spans_schema_columns() {
        let layout = SheetLayout::default();
        assert_eq!(layout.record_row_range(2, 3), "'Entry Requirements'!A2:C2");
        assert_eq!(layout.record_row_range(6, 28), "'Entry Requirements'!A6:AB6");
    }

    #[test]
    fn record_cell_addresses_one_column() {
        let layout = SheetLayout::default();
        assert_eq!(layout.record_cell_range(2, 2), "'Entry Requirements'!C2");
    }
}

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::CoreError;

/// Ordered field names shared by every record of a loaded sheet.
///
/// The first column is the key; every other column with a header is a
/// qualification. Columns whose header cell is blank are spacers: they keep
/// their place so later columns stay addressable, but carry no field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    columns: Vec<String>,
    qualifications: Vec<String>,
}

impl FieldSchema {
    /// Build a schema from a header row, trimming every cell.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Schema` if the header is empty or names a column
    /// twice.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, CoreError> {
        let columns: Vec<String> = header.iter().map(|h| h.as_ref().trim().to_string()).collect();
        if columns.is_empty() {
            return Err(CoreError::Schema("header row is empty".into()));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in columns.iter().filter(|n| !n.is_empty()) {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::Schema(format!(
                    "header names column '{name}' more than once"
                )));
            }
        }

        let qualifications = columns[1..]
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect();
        Ok(Self {
            columns,
            qualifications,
        })
    }

    /// Name of the key column.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.columns[0]
    }

    /// Qualification column names, in sheet order. Spacers are left out.
    #[must_use]
    pub fn qualification_names(&self) -> &[String] {
        &self.qualifications
    }

    /// Every header cell in sheet order, key first, spacers as empty names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns, key and spacers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; a schema has at least the key column.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Zero-based column index of `name`. Spacers are never found.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.columns.iter().position(|n| n == name)
    }

    /// Zero-based column indexes of the spacer columns.
    pub fn spacer_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, n)| n.is_empty())
            .map(|(idx, _)| idx)
    }

    #[must_use]
    pub fn is_qualification(&self, name: &str) -> bool {
        self.qualifications.iter().any(|n| n == name)
    }

    /// A schema with the same key column and a single qualification.
    ///
    /// Used by the quick-edit path, which diffs and writes one field only.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `name` is not a qualification column.
    pub fn restricted_to(&self, name: &str) -> Result<Self, CoreError> {
        if !self.is_qualification(name) {
            return Err(CoreError::Validation(format!(
                "unknown qualification '{name}'"
            )));
        }
        Ok(Self {
            columns: vec![self.key_name().to_string(), name.to_string()],
            qualifications: vec![name.to_string()],
        })
    }
}

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::FieldSchema;
use crate::errors::CoreError;

/// One programme row.
///
/// Every qualification column of the schema has a value; an empty string
/// means "not set". The key is immutable once the record exists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub fields: BTreeMap<String, String>,
    /// Cells under header-less spacer columns, in sheet order. Written back
    /// unchanged so a full-row save never clears them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spacer_cells: Vec<String>,
}

impl Record {
    /// Build a record from a raw sheet row.
    ///
    /// Cells are trimmed. Short rows are padded with empty values and cells
    /// past the last header column are ignored. Returns `None` when the key
    /// cell is empty after trimming.
    #[must_use]
    pub fn from_row<S: AsRef<str>>(schema: &FieldSchema, row: &[S]) -> Option<Self> {
        let cell = |idx: usize| row.get(idx).map_or("", |c| c.as_ref().trim());

        let key = cell(0);
        if key.is_empty() {
            return None;
        }

        let fields = schema
            .names()
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, name)| !name.is_empty())
            .map(|(idx, name)| (name.clone(), cell(idx).to_string()))
            .collect();
        let spacer_cells = schema
            .spacer_positions()
            .map(|idx| cell(idx).to_string())
            .collect();

        Some(Self {
            key: key.to_string(),
            fields,
            spacer_cells,
        })
    }

    /// Build a record from a field mapping validated against `schema`.
    ///
    /// Values are trimmed and missing qualifications default to empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the key is empty or `fields` names a
    /// column the schema does not have.
    pub fn new(
        schema: &FieldSchema,
        key: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<Self, CoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::Validation(format!(
                "record is missing its '{}' value",
                schema.key_name()
            )));
        }

        Ok(Self {
            key: key.to_string(),
            fields: normalize_fields(schema, fields)?,
            spacer_cells: Vec::new(),
        })
    }

    /// Carry the spacer cells of `previous` over to this record.
    #[must_use]
    pub fn keeping_spacers_of(mut self, previous: &Self) -> Self {
        self.spacer_cells.clone_from(&previous.spacer_cells);
        self
    }

    /// Value of a qualification, empty when unset or unknown.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// Render the record as a sheet row, one cell per schema column.
    #[must_use]
    pub fn to_row(&self, schema: &FieldSchema) -> Vec<String> {
        let mut spacers = self.spacer_cells.iter();
        schema
            .names()
            .iter()
            .enumerate()
            .map(|(idx, name)| match (idx, name.is_empty()) {
                (0, _) => self.key.clone(),
                (_, true) => spacers.next().cloned().unwrap_or_default(),
                (_, false) => self.value(name).to_string(),
            })
            .collect()
    }

    /// Qualification names with a non-empty value, in schema order.
    pub fn filled<'a>(&'a self, schema: &'a FieldSchema) -> impl Iterator<Item = &'a String> + 'a {
        schema
            .qualification_names()
            .iter()
            .filter(|name| !self.value(name).trim().is_empty())
    }

    #[must_use]
    pub fn filled_count(&self, schema: &FieldSchema) -> usize {
        self.filled(schema).count()
    }

    /// Share of filled qualifications as a rounded percentage.
    #[must_use]
    pub fn percent_complete(&self, schema: &FieldSchema) -> u8 {
        percent_complete(
            self.filled_count(schema),
            schema.qualification_names().len(),
        )
    }
}

/// `round(100 * filled / total)` with halves rounded up; 0 when `total` is 0.
#[must_use]
pub fn percent_complete(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let filled = filled.min(total);
    let pct = (filled * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}

/// Trim a field mapping and fill in every qualification of the schema.
///
/// # Errors
///
/// Returns `CoreError::Validation` for names outside the qualification set.
pub(crate) fn normalize_fields(
    schema: &FieldSchema,
    fields: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, CoreError> {
    if let Some(unknown) = fields.keys().find(|name| !schema.is_qualification(name)) {
        return Err(CoreError::Validation(format!(
            "unknown qualification '{unknown}'"
        )));
    }

    Ok(schema
        .qualification_names()
        .iter()
        .map(|name| {
            let value = fields.get(name).map_or("", |v| v.trim());
            (name.clone(), value.to_string())
        })
        .collect())
}

//! In-memory mirror of the records tab.

use std::collections::{BTreeMap, HashMap};

use ereq_core::entities::{FieldSchema, Record, percent_complete};
use ereq_sheets::a1::data_row_number;

use crate::error::StoreError;

/// Every record of the sheet plus the schema taken from its header row.
///
/// Indices are positions in the cache, in sheet order. Each record also
/// remembers the sheet row it was read from, since blank-key rows are
/// dropped on load and would otherwise shift later rows.
#[derive(Debug, Clone)]
pub struct RecordCache {
    schema: FieldSchema,
    records: Vec<Record>,
    sheet_rows: Vec<usize>,
}

impl RecordCache {
    /// Build the cache from a header row followed by data rows.
    ///
    /// Cells are trimmed and rows with an empty key are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Schema` if fewer than two rows are supplied, the
    /// header is unusable, or two rows share a key.
    pub fn load<R: AsRef<[S]>, S: AsRef<str>>(rows: &[R]) -> Result<Self, StoreError> {
        let [header, data @ ..] = rows else {
            return Err(StoreError::Schema(
                "expected a header row and at least one data row".into(),
            ));
        };
        if data.is_empty() {
            return Err(StoreError::Schema(
                "expected a header row and at least one data row".into(),
            ));
        }

        let schema = FieldSchema::from_header(header.as_ref())?;
        let mut records = Vec::with_capacity(data.len());
        let mut sheet_rows = Vec::with_capacity(data.len());
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(data.len());

        for (offset, row) in data.iter().enumerate() {
            let Some(record) = Record::from_row(&schema, row.as_ref()) else {
                continue;
            };
            let sheet_row = data_row_number(offset);
            if let Some(first) = seen.insert(record.key.clone(), sheet_row) {
                return Err(StoreError::Schema(format!(
                    "'{}' appears on rows {first} and {sheet_row}",
                    record.key
                )));
            }
            records.push(record);
            sheet_rows.push(sheet_row);
        }

        tracing::debug!(
            records = records.len(),
            qualifications = schema.qualification_names().len(),
            "records loaded"
        );
        Ok(Self {
            schema,
            records,
            sheet_rows,
        })
    }

    #[must_use]
    pub const fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if `index` is out of range.
    pub fn get(&self, index: usize) -> Result<&Record, StoreError> {
        self.records.get(index).ok_or_else(|| not_found(index))
    }

    /// 1-based sheet row the record at `index` lives on.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if `index` is out of range.
    pub fn sheet_row(&self, index: usize) -> Result<usize, StoreError> {
        self.sheet_rows
            .get(index)
            .copied()
            .ok_or_else(|| not_found(index))
    }

    /// Cache index of `key`: an exact match, else the only case-insensitive one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when nothing matches, or when several
    /// records match case-insensitively and none exactly.
    pub fn index_of(&self, key: &str) -> Result<usize, StoreError> {
        let key = key.trim();
        if let Some(idx) = self.records.iter().position(|r| r.key == key) {
            return Ok(idx);
        }

        let folded = key.to_lowercase();
        let mut matches = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.key.to_lowercase() == folded)
            .map(|(idx, _)| idx);
        match (matches.next(), matches.next()) {
            (Some(idx), None) => Ok(idx),
            _ => Err(StoreError::NotFound {
                entity: self.schema.key_name().to_lowercase(),
                id: key.to_string(),
            }),
        }
    }

    /// # Errors
    ///
    /// See [`RecordCache::index_of`].
    pub fn get_by_key(&self, key: &str) -> Result<&Record, StoreError> {
        self.index_of(key).map(|idx| &self.records[idx])
    }

    /// Records whose key contains `query`, ignoring case, in sheet order.
    /// An empty query matches everything.
    pub fn find<'a>(&'a self, query: &str) -> impl Iterator<Item = (usize, &'a Record)> + 'a {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| needle.is_empty() || r.key.to_lowercase().contains(&needle))
    }

    /// Overwrite one qualification in the cache. No remote effect.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for a bad index and
    /// `StoreError::Validation` for a field outside the schema.
    pub fn update_field(&mut self, index: usize, field: &str, value: &str) -> Result<(), StoreError> {
        if !self.schema.is_qualification(field) {
            return Err(StoreError::Validation(format!(
                "unknown qualification '{field}'"
            )));
        }
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| not_found(index))?;
        record.fields.insert(field.to_string(), value.trim().to_string());
        Ok(())
    }

    /// Replace every qualification of a record, keeping its key. Fields
    /// missing from `fields` become empty. No remote effect.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for a bad index and
    /// `StoreError::Validation` for a field outside the schema.
    pub fn update_all_fields(
        &mut self,
        index: usize,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        let current = self.get(index)?;
        let replacement =
            Record::new(&self.schema, &current.key, fields)?.keeping_spacers_of(current);
        self.records[index] = replacement;
        Ok(())
    }

    #[must_use]
    pub fn filled_count(&self, record: &Record) -> usize {
        record.filled_count(&self.schema)
    }

    /// Rounded share of filled qualifications, 0 when the schema has none.
    #[must_use]
    pub fn percent_complete(&self, record: &Record) -> u8 {
        percent_complete(
            self.filled_count(record),
            self.schema.qualification_names().len(),
        )
    }
}

fn not_found(index: usize) -> StoreError {
    StoreError::NotFound {
        entity: "record".into(),
        id: format!("#{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect()
    }

    fn cache() -> RecordCache {
        RecordCache::load(&rows(&[
            &["Programme", "Maths", "English", "Art"],
            &["Computer Science", "A", "B", ""],
            &["History", "", "A", ""],
            &["Fine Art", "", "", "Portfolio"],
        ]))
        .unwrap()
    }

    #[test]
    fn fresh_load_drops_blank_keys() {
        let cache = RecordCache::load(&rows(&[
            &["Programme", "Maths", "English"],
            &["CS", "A", "B"],
            &["", "x", "y"],
        ]))
        .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(0).unwrap().key, "CS");
    }

    #[test]
    fn load_trims_every_cell() {
        let cache = RecordCache::load(&rows(&[
            &[" Programme ", " Maths "],
            &["  CS ", " A* "],
        ]))
        .unwrap();
        assert_eq!(cache.schema().names(), ["Programme", "Maths"]);
        assert_eq!(cache.get(0).unwrap().value("Maths"), "A*");
    }

    #[test]
    fn blank_header_cells_do_not_block_loading() {
        let cache = RecordCache::load(&rows(&[
            &["Programme", "Maths", "", "English", "", "Art"],
            &["CS", "A", "", "B", "", "Portfolio"],
        ]))
        .unwrap();
        assert_eq!(cache.schema().qualification_names(), ["Maths", "English", "Art"]);
        let record = cache.get(0).unwrap();
        assert_eq!(record.value("Art"), "Portfolio");
        assert_eq!(cache.percent_complete(record), 100);
    }

    #[test]
    fn load_needs_header_and_data() {
        let header_only = rows(&[&["Programme", "Maths"]]);
        assert!(matches!(RecordCache::load(&header_only), Err(StoreError::Schema(_))));

        let nothing: Vec<Vec<String>> = Vec::new();
        assert!(matches!(RecordCache::load(&nothing), Err(StoreError::Schema(_))));
    }

    #[test]
    fn load_rejects_duplicate_keys() {
        let err = RecordCache::load(&rows(&[
            &["Programme", "Maths"],
            &["CS", "A"],
            &["History", "B"],
            &["CS", "C"],
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Schema error: 'CS' appears on rows 2 and 4");
    }

    #[test]
    fn sheet_rows_skip_dropped_rows() {
        let cache = RecordCache::load(&rows(&[
            &["Programme", "Maths"],
            &["CS", "A"],
            &["", ""],
            &["History", "B"],
        ]))
        .unwrap();
        assert_eq!(cache.sheet_row(0).unwrap(), 2);
        assert_eq!(cache.sheet_row(1).unwrap(), 4);
    }

    #[test]
    fn get_out_of_range_is_not_found() {
        assert!(matches!(cache().get(9), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn get_by_key_prefers_exact_match() {
        let cache = cache();
        assert_eq!(cache.get_by_key("History").unwrap().key, "History");
        assert_eq!(cache.get_by_key("history").unwrap().key, "History");
        assert!(matches!(
            cache.get_by_key("Physics"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn get_by_key_rejects_ambiguous_case_match() {
        let cache = RecordCache::load(&rows(&[
            &["Programme", "Maths"],
            &["Law", "A"],
            &["LAW", "B"],
        ]))
        .unwrap();
        assert_eq!(cache.get_by_key("LAW").unwrap().value("Maths"), "B");
        assert!(cache.get_by_key("law").is_err());
    }

    #[rstest]
    #[case("", 3)]
    #[case("art", 1)]
    #[case("SCIENCE", 1)]
    #[case("  hist ", 1)]
    #[case("physics", 0)]
    fn find_is_case_insensitive(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(cache().find(query).count(), expected);
    }

    #[test]
    fn update_field_changes_cache_only_for_known_fields() {
        let mut cache = cache();
        cache.update_field(1, "Maths", " B ").unwrap();
        assert_eq!(cache.get(1).unwrap().value("Maths"), "B");
        assert!(matches!(
            cache.update_field(1, "Programme", "x"),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn update_all_fields_keeps_key_and_schema_order() {
        let mut cache = cache();
        let fields = BTreeMap::from([
            ("Art".to_string(), "Portfolio".to_string()),
            ("Maths".to_string(), "A".to_string()),
        ]);
        cache.update_all_fields(1, &fields).unwrap();
        assert_eq!(
            cache.get(1).unwrap().to_row(cache.schema()),
            vec!["History", "A", "", "Portfolio"]
        );
    }

    #[rstest]
    #[case(0, 67)]
    #[case(1, 33)]
    #[case(2, 33)]
    fn percent_complete_rounds(#[case] index: usize, #[case] expected: u8) {
        let cache = cache();
        let record = cache.get(index).unwrap();
        assert_eq!(cache.percent_complete(record), expected);
    }

    #[test]
    fn percent_complete_without_qualifications_is_zero() {
        let cache = RecordCache::load(&rows(&[&["Programme"], &["CS"]])).unwrap();
        assert_eq!(cache.percent_complete(cache.get(0).unwrap()), 0);
    }
}

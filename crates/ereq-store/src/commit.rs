//! Diff-and-append: persist a record edit, then log what changed.
//!
//! Every commit follows the same protocol:
//! 1. Snapshot the record as cached
//! 2. Overwrite the record remotely (failure aborts, cache untouched)
//! 3. Update the cache
//! 4. Diff old against new, in schema order
//! 5. Append one changelog row per changed field (failure is a warning)

use std::collections::BTreeMap;

use ereq_core::entities::{FieldChange, FieldSchema, Record, UserProfile};
use ereq_sheets::SheetsApi;

use crate::error::StoreError;
use crate::store::EntryStore;

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Changed fields, in schema order.
    pub changes: Vec<FieldChange>,
    /// Set when the record was saved but the changelog append failed.
    pub audit_warning: Option<String>,
}

impl CommitOutcome {
    #[must_use]
    pub fn fields_changed(&self) -> usize {
        self.changes.len()
    }
}

/// Fields of `schema` whose trimmed value differs between `old` and `new`.
///
/// Qualifications missing from `new` count as empty.
#[must_use]
pub fn compute_changes(
    schema: &FieldSchema,
    old: &Record,
    new: &BTreeMap<String, String>,
) -> Vec<FieldChange> {
    schema
        .qualification_names()
        .iter()
        .filter_map(|name| {
            let old_value = old.value(name).trim();
            let new_value = new.get(name).map_or("", |v| v.trim());
            (old_value != new_value).then(|| FieldChange {
                field_name: name.clone(),
                old_value: old_value.to_string(),
                new_value: new_value.to_string(),
            })
        })
        .collect()
}

impl<S: SheetsApi> EntryStore<S> {
    /// Save a full set of field values for the record at `index`.
    ///
    /// Qualifications missing from `values` are written as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for unknown field names (before any
    /// remote call), `StoreError::NotFound` for a bad index, and
    /// `StoreError::Save` if the remote overwrite is rejected. In every error
    /// case the cache and changelog are unchanged.
    pub async fn commit_record_edit(
        &mut self,
        actor: &UserProfile,
        index: usize,
        values: &BTreeMap<String, String>,
    ) -> Result<CommitOutcome, StoreError> {
        let schema = self.records.schema().clone();
        let old = self.records.get(index)?.clone();
        let updated = Record::new(&schema, &old.key, values)?.keeping_spacers_of(&old);

        let range = self
            .layout
            .record_row_range(self.records.sheet_row(index)?, schema.len());
        tracing::debug!(%range, key = %old.key, "saving record");
        self.sheets
            .overwrite_range(&range, vec![updated.to_row(&schema)])
            .await
            .map_err(StoreError::Save)?;

        self.records.update_all_fields(index, &updated.fields)?;
        let changes = compute_changes(&schema, &old, &updated.fields);
        let audit_warning = self.log_changes(actor, &old.key, &changes).await;
        Ok(CommitOutcome {
            changes,
            audit_warning,
        })
    }

    /// Save a single qualification of the record at `index`.
    ///
    /// Writes one cell and diffs only that field.
    ///
    /// # Errors
    ///
    /// Same as [`EntryStore::commit_record_edit`].
    pub async fn commit_field_edit(
        &mut self,
        actor: &UserProfile,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<CommitOutcome, StoreError> {
        let schema = self.records.schema().restricted_to(field)?;
        let column = self
            .records
            .schema()
            .position(field)
            .ok_or_else(|| StoreError::Validation(format!("unknown qualification '{field}'")))?;
        let old = self.records.get(index)?.clone();
        let value = value.trim();

        let range = self
            .layout
            .record_cell_range(self.records.sheet_row(index)?, column);
        tracing::debug!(%range, key = %old.key, field, "saving field");
        self.sheets
            .overwrite_range(&range, vec![vec![value.to_string()]])
            .await
            .map_err(StoreError::Save)?;

        self.records.update_field(index, field, value)?;
        let new = BTreeMap::from([(field.to_string(), value.to_string())]);
        let changes = compute_changes(&schema, &old, &new);
        let audit_warning = self.log_changes(actor, &old.key, &changes).await;
        Ok(CommitOutcome {
            changes,
            audit_warning,
        })
    }

    /// Append `changes` to the changelog, turning a failure into a warning.
    async fn log_changes(
        &mut self,
        actor: &UserProfile,
        record_key: &str,
        changes: &[FieldChange],
    ) -> Option<String> {
        let range = self.layout.audit_append_range();
        match self
            .audit
            .append(&self.sheets, &range, actor, record_key, changes)
            .await
        {
            Ok(written) => {
                tracing::debug!(written, key = record_key, "changelog updated");
                None
            }
            Err(error) => {
                tracing::warn!(%error, key = record_key, "record saved but changelog append failed");
                Some(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySheets;
    use ereq_sheets::SheetLayout;
    use pretty_assertions::assert_eq;

    const RECORDS: &str = "'Entry Requirements'!A1:ZZ";

    fn actor() -> UserProfile {
        UserProfile {
            email: "ana@uni.edu".into(),
            name: Some("Ana Ruiz".into()),
            picture: None,
        }
    }

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    async fn store() -> (EntryStore<MemorySheets>, MemorySheets) {
        let sheets = MemorySheets::new().with_range(
            RECORDS,
            &[
                &["Programme", "Maths", "English", "Art"],
                &["CS", "A", "", ""],
                &["", "", "", ""],
                &["Law", "B", "B", ""],
            ],
        );
        let store = EntryStore::load(sheets.clone(), SheetLayout::default())
            .await
            .unwrap();
        (store, sheets)
    }

    #[test]
    fn diff_reports_only_changed_fields() {
        let schema = FieldSchema::from_header(&["Programme", "A", "B"]).unwrap();
        let old = Record::from_row(&schema, &["K", "x", ""]).unwrap();
        let changes = compute_changes(&schema, &old, &values(&[("A", "x"), ("B", "y")]));
        assert_eq!(
            changes,
            vec![FieldChange {
                field_name: "B".into(),
                old_value: String::new(),
                new_value: "y".into(),
            }]
        );
    }

    #[test]
    fn diff_follows_schema_order_and_ignores_padding() {
        let schema = FieldSchema::from_header(&["Programme", "Maths", "English", "Art"]).unwrap();
        let old = Record::from_row(&schema, &["K", "A", "B", "C"]).unwrap();
        let changes = compute_changes(
            &schema,
            &old,
            &values(&[("Art", "D"), ("Maths", " A "), ("English", "")]),
        );
        let fields: Vec<&str> = changes.iter().map(|c| c.field_name.as_str()).collect();
        assert_eq!(fields, ["English", "Art"]);
    }

    #[tokio::test]
    async fn record_edit_round_trips_through_cache() {
        let (mut store, sheets) = store().await;
        let outcome = store
            .commit_record_edit(
                &actor(),
                1,
                &values(&[("Maths", " A* "), ("English", "C"), ("Art", "Portfolio")]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.fields_changed(), 3);
        assert_eq!(outcome.audit_warning, None);
        let record = store.records().get(1).unwrap();
        assert_eq!(record.to_row(store.records().schema()), vec!["Law", "A*", "C", "Portfolio"]);

        // the blank row 3 was dropped on load, so Law still lives on row 4
        assert_eq!(
            sheets.overwrites(),
            vec![(
                "'Entry Requirements'!A4:D4".to_string(),
                vec![vec!["Law".to_string(), "A*".into(), "C".into(), "Portfolio".into()]],
            )]
        );
        assert_eq!(sheets.appended_rows("Changelog!A:G").len(), 3);
        assert_eq!(store.audit().len(), 3);
        assert_eq!(store.last_updated("Law").unwrap().actor, "Ana Ruiz");
    }

    #[tokio::test]
    async fn identical_second_commit_logs_nothing() {
        let (mut store, sheets) = store().await;
        let edit = values(&[("Maths", "A"), ("English", "C")]);

        let first = store.commit_record_edit(&actor(), 0, &edit).await.unwrap();
        assert_eq!(first.fields_changed(), 1);

        let second = store.commit_record_edit(&actor(), 0, &edit).await.unwrap();
        assert_eq!(second.fields_changed(), 0);
        assert_eq!(sheets.append_calls(), 1);
        assert_eq!(sheets.overwrites().len(), 2);
    }

    #[tokio::test]
    async fn unchanged_save_skips_changelog() {
        let (mut store, sheets) = store().await;
        let outcome = store
            .commit_record_edit(&actor(), 0, &values(&[("Maths", "A")]))
            .await
            .unwrap();
        assert!(outcome.changes.is_empty());
        assert_eq!(sheets.append_calls(), 0);
        assert_eq!(sheets.overwrites().len(), 1);
    }

    #[tokio::test]
    async fn rejected_overwrite_leaves_everything_unchanged() {
        let (mut store, sheets) = store().await;
        sheets.fail_overwrites("The caller does not have permission");

        let err = store
            .commit_record_edit(&actor(), 0, &values(&[("Maths", "B")]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Save failed: The caller does not have permission");
        assert_eq!(store.records().get(0).unwrap().value("Maths"), "A");
        assert!(store.audit().is_empty());
        assert_eq!(sheets.append_calls(), 0);
    }

    #[tokio::test]
    async fn changelog_failure_is_a_warning() {
        let (mut store, sheets) = store().await;
        sheets.fail_appends("Unable to parse range: Changelog!A:G");

        let outcome = store
            .commit_record_edit(&actor(), 0, &values(&[("Maths", "B")]))
            .await
            .unwrap();

        assert_eq!(outcome.fields_changed(), 1);
        assert_eq!(
            outcome.audit_warning.as_deref(),
            Some("saved, but the changelog was not updated: Unable to parse range: Changelog!A:G")
        );
        assert_eq!(store.records().get(0).unwrap().value("Maths"), "B");
        assert!(store.audit().is_empty());
    }

    #[tokio::test]
    async fn unknown_field_fails_before_any_write() {
        let (mut store, sheets) = store().await;
        let err = store
            .commit_record_edit(&actor(), 0, &values(&[("Physics", "A")]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(sheets.overwrites().is_empty());
    }

    #[tokio::test]
    async fn field_edit_writes_one_cell() {
        let (mut store, sheets) = store().await;
        let outcome = store
            .commit_field_edit(&actor(), 0, "English", " C ")
            .await
            .unwrap();

        assert_eq!(
            outcome.changes,
            vec![FieldChange {
                field_name: "English".into(),
                old_value: String::new(),
                new_value: "C".into(),
            }]
        );
        assert_eq!(
            sheets.overwrites(),
            vec![("'Entry Requirements'!C2".to_string(), vec![vec!["C".to_string()]])]
        );
        assert_eq!(store.records().get(0).unwrap().value("English"), "C");
        assert_eq!(store.records().get(0).unwrap().value("Maths"), "A");
        assert_eq!(store.audit().entries_for("CS").count(), 1);
    }

    #[tokio::test]
    async fn field_edit_rejects_key_column() {
        let (mut store, sheets) = store().await;
        let result = store.commit_field_edit(&actor(), 0, "Programme", "X").await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(sheets.overwrites().is_empty());
    }

    #[tokio::test]
    async fn log_only_grows() {
        let (mut store, _sheets) = store().await;
        store
            .commit_field_edit(&actor(), 0, "English", "C")
            .await
            .unwrap();
        let first = store.audit().entries().to_vec();

        store
            .commit_field_edit(&actor(), 0, "English", "D")
            .await
            .unwrap();
        assert_eq!(store.audit().len(), first.len() + 1);
        assert_eq!(&store.audit().entries()[1..], first.as_slice());
    }

    #[tokio::test]
    async fn spacer_columns_keep_their_place_on_save() {
        let sheets = MemorySheets::new().with_range(
            RECORDS,
            &[
                &["Programme", "Maths", "", "English"],
                &["CS", "A", "see notes", "B"],
            ],
        );
        let mut store = EntryStore::load(sheets.clone(), SheetLayout::default())
            .await
            .unwrap();

        store
            .commit_field_edit(&actor(), 0, "English", "C")
            .await
            .unwrap();
        store
            .commit_record_edit(&actor(), 0, &values(&[("Maths", "A*"), ("English", "C")]))
            .await
            .unwrap();

        assert_eq!(
            sheets.overwrites(),
            vec![
                ("'Entry Requirements'!D2".to_string(), vec![vec!["C".to_string()]]),
                (
                    "'Entry Requirements'!A2:D2".to_string(),
                    vec![vec!["CS".to_string(), "A*".into(), "see notes".into(), "C".into()]],
                ),
            ]
        );
    }
}

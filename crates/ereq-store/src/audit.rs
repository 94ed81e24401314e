//! Append-only changelog and the last-updated index derived from it.

use std::collections::HashMap;

use ereq_core::entities::{AuditEntry, FieldChange, LastUpdate, UserProfile};
use ereq_core::timestamp;
use ereq_sheets::SheetsApi;

use crate::error::StoreError;

/// The changelog, newest entry first (the reverse of sheet order).
///
/// Entries are never edited or removed once recorded. The last-updated index
/// is rebuilt in full after every load and append.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
    last_updated: HashMap<String, LastUpdate>,
}

impl AuditLog {
    /// Build the log from changelog rows in sheet order (header excluded).
    /// Blank rows are skipped.
    #[must_use]
    pub fn load<R: AsRef<[S]>, S: AsRef<str>>(rows: &[R]) -> Self {
        let entries = rows
            .iter()
            .rev()
            .map(AsRef::<[S]>::as_ref)
            .filter(|row| row.iter().any(|c| !c.as_ref().trim().is_empty()))
            .map(AuditEntry::from_row)
            .collect();
        let mut log = Self {
            entries,
            last_updated: HashMap::new(),
        };
        log.rebuild_last_updated();
        tracing::debug!(entries = log.entries.len(), "changelog loaded");
        log
    }

    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one record, newest first. Borrowing only; call it as often
    /// as needed.
    pub fn entries_for<'a>(
        &'a self,
        record_key: &'a str,
    ) -> impl Iterator<Item = &'a AuditEntry> + Clone + 'a {
        self.entries
            .iter()
            .filter(move |e| e.record_key == record_key)
    }

    /// Recompute the last-updated index: the first entry met per key while
    /// scanning newest first wins.
    pub fn rebuild_last_updated(&mut self) {
        let mut index = HashMap::new();
        for entry in &self.entries {
            index
                .entry(entry.record_key.clone())
                .or_insert_with(|| LastUpdate::from(entry));
        }
        self.last_updated = index;
    }

    /// Most recent change to `record_key`, if any was logged.
    #[must_use]
    pub fn last_updated(&self, record_key: &str) -> Option<&LastUpdate> {
        self.last_updated.get(record_key)
    }

    /// Stamp `changes` with the current time and `actor`, append them to the
    /// remote changelog in one call, and on success record them here.
    ///
    /// Returns the number of entries written. On failure the in-memory log is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AuditWrite` if the remote append fails.
    pub async fn append<S: SheetsApi + ?Sized>(
        &mut self,
        sheets: &S,
        range: &str,
        actor: &UserProfile,
        record_key: &str,
        changes: &[FieldChange],
    ) -> Result<usize, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let stamped_at = timestamp::now();
        let stamped: Vec<AuditEntry> = changes
            .iter()
            .cloned()
            .map(|change| AuditEntry::stamp(&stamped_at, actor, record_key, change))
            .collect();
        let rows = stamped.iter().map(AuditEntry::to_row).collect();

        sheets
            .append_rows(range, rows)
            .await
            .map_err(StoreError::AuditWrite)?;

        let written = stamped.len();
        self.record_appended(stamped);
        Ok(written)
    }

    /// Prepend entries that were appended remotely, in sheet order.
    fn record_appended(&mut self, appended: Vec<AuditEntry>) {
        let mut entries: Vec<AuditEntry> = appended.into_iter().rev().collect();
        entries.append(&mut self.entries);
        self.entries = entries;
        self.rebuild_last_updated();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySheets;
    use pretty_assertions::assert_eq;

    fn row(ts: &str, email: &str, name: &str, key: &str, field: &str, old: &str, new: &str) -> Vec<String> {
        [ts, email, name, key, field, old, new]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn actor() -> UserProfile {
        UserProfile {
            email: "ana@uni.edu".into(),
            name: Some("Ana".into()),
            picture: None,
        }
    }

    fn change(field: &str, old: &str, new: &str) -> FieldChange {
        FieldChange {
            field_name: field.into(),
            old_value: old.into(),
            new_value: new.into(),
        }
    }

    #[test]
    fn load_reverses_sheet_order() {
        let log = AuditLog::load(&[
            row("2024-01-01 09:00:00", "a@x", "A", "CS", "Maths", "", "A"),
            row("2024-02-01 09:00:00", "b@x", "B", "CS", "Maths", "A", "B"),
        ]);
        assert_eq!(log.entries()[0].new_value, "B");
        assert_eq!(log.entries()[1].new_value, "A");
    }

    #[test]
    fn load_skips_blank_rows_and_pads_short_ones() {
        let log = AuditLog::load(&[
            vec!["2024-01-01 09:00:00".to_string(), "a@x".into(), String::new(), "CS".into(), "Maths".into()],
            vec![String::new(), "  ".into()],
        ]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].old_value, "");
        assert_eq!(log.entries()[0].new_value, "");
    }

    #[test]
    fn last_updated_tracks_newest_entry_per_key() {
        let log = AuditLog::load(&[
            row("2024-01-01 09:00:00", "t1@x", "T One", "K", "Maths", "", "A"),
            row("2024-01-02 09:00:00", "o@x", "", "Other", "Maths", "", "A"),
            row("2024-01-03 09:00:00", "t2@x", "", "K", "Maths", "A", "B"),
        ]);
        let last = log.last_updated("K").unwrap();
        assert_eq!(last.timestamp, "2024-01-03 09:00:00");
        assert_eq!(last.actor, "t2@x");
        assert_eq!(log.last_updated("Other").unwrap().timestamp, "2024-01-02 09:00:00");
        assert!(log.last_updated("Missing").is_none());
    }

    #[test]
    fn entries_for_is_restartable() {
        let log = AuditLog::load(&[
            row("2024-01-01 09:00:00", "a@x", "", "CS", "Maths", "", "A"),
            row("2024-01-02 09:00:00", "a@x", "", "Law", "Maths", "", "A"),
            row("2024-01-03 09:00:00", "a@x", "", "CS", "English", "", "B"),
        ]);
        let history = log.entries_for("CS");
        let fields: Vec<&str> = history.clone().map(|e| e.field_name.as_str()).collect();
        assert_eq!(fields, ["English", "Maths"]);
        assert_eq!(history.count(), 2);
        assert_eq!(log.entries_for("CS").count(), 2);
    }

    #[tokio::test]
    async fn append_writes_one_batch_and_prepends() {
        let sheets = MemorySheets::new();
        let mut log = AuditLog::load(&[row("2024-01-01 09:00:00", "a@x", "", "CS", "Maths", "", "A")]);
        let before = log.entries().to_vec();

        let written = log
            .append(
                &sheets,
                "Changelog!A:G",
                &actor(),
                "CS",
                &[change("Maths", "A", "B"), change("English", "", "C")],
            )
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(sheets.append_calls(), 1);
        assert_eq!(log.len(), 3);
        assert_eq!(&log.entries()[2..], before.as_slice());

        // newest first: the last row written comes first
        assert_eq!(log.entries()[0].field_name, "English");
        assert_eq!(log.entries()[1].field_name, "Maths");
        assert_eq!(log.entries()[0].actor_name, "Ana");

        let appended = sheets.appended_rows("Changelog!A:G");
        assert_eq!(appended.len(), 2);
        assert_eq!(&appended[0][1..], ["ana@uni.edu", "Ana", "CS", "Maths", "A", "B"]);
        assert_eq!(log.last_updated("CS").unwrap().actor, "Ana");
    }

    #[tokio::test]
    async fn failed_append_leaves_log_untouched() {
        let sheets = MemorySheets::new();
        sheets.fail_appends("Unable to parse range: Changelog!A:G");
        let mut log = AuditLog::default();

        let err = log
            .append(&sheets, "Changelog!A:G", &actor(), "CS", &[change("Maths", "", "A")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AuditWrite(_)));
        assert!(log.is_empty());
        assert!(log.last_updated("CS").is_none());
    }

    #[tokio::test]
    async fn empty_change_set_skips_remote_call() {
        let sheets = MemorySheets::new();
        let mut log = AuditLog::default();
        let written = log
            .append(&sheets, "Changelog!A:G", &actor(), "CS", &[])
            .await
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(sheets.append_calls(), 0);
    }
}

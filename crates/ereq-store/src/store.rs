//! The record cache and changelog of one spreadsheet, with their remote.

use ereq_core::entities::LastUpdate;
use ereq_sheets::{SheetLayout, SheetsApi};

use crate::audit::AuditLog;
use crate::error::StoreError;
use crate::records::RecordCache;

/// Owns the loaded records and changelog together with the client used to
/// persist changes to them.
///
/// All mutation goes through the commit methods (see `commit.rs`), which
/// keep the cache, the changelog, and the remote sheet in step.
pub struct EntryStore<S> {
    pub(crate) sheets: S,
    pub(crate) layout: SheetLayout,
    pub(crate) records: RecordCache,
    pub(crate) audit: AuditLog,
}

impl<S: SheetsApi> EntryStore<S> {
    /// Read the records tab and the changelog concurrently.
    ///
    /// A changelog that cannot be read (missing tab, no permission) is
    /// tolerated as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RemoteRead` if the records cannot be read and
    /// `StoreError::Schema` if they do not form a table.
    pub async fn load(sheets: S, layout: SheetLayout) -> Result<Self, StoreError> {
        let (records, audit) = read_both(&sheets, &layout).await?;
        Ok(Self {
            sheets,
            layout,
            records,
            audit,
        })
    }

    /// Re-read both datasets, replacing what is cached.
    ///
    /// # Errors
    ///
    /// Same as [`EntryStore::load`]; on error the current state is kept.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        let (records, audit) = read_both(&self.sheets, &self.layout).await?;
        self.records = records;
        self.audit = audit;
        Ok(())
    }

    #[must_use]
    pub const fn records(&self) -> &RecordCache {
        &self.records
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditLog {
        &self.audit
    }

    #[must_use]
    pub const fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    #[must_use]
    pub fn last_updated(&self, record_key: &str) -> Option<&LastUpdate> {
        self.audit.last_updated(record_key)
    }
}

async fn read_both<S: SheetsApi>(
    sheets: &S,
    layout: &SheetLayout,
) -> Result<(RecordCache, AuditLog), StoreError> {
    let records_range = layout.records_range();
    let audit_range = layout.audit_read_range();
    tracing::debug!(records = %records_range, audit = %audit_range, "loading sheet");

    let (records, audit) = tokio::join!(
        sheets.read_range(&records_range),
        sheets.read_range(&audit_range)
    );

    let rows = records.map_err(|source| StoreError::RemoteRead {
        what: "records",
        source,
    })?;
    let records = RecordCache::load(&rows)?;

    let audit = match audit {
        Ok(rows) => AuditLog::load(&rows),
        Err(error) => {
            tracing::warn!(%error, range = %audit_range, "changelog unavailable, continuing without history");
            AuditLog::default()
        }
    };

    Ok((records, audit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySheets;
    use pretty_assertions::assert_eq;

    fn sheets() -> MemorySheets {
        MemorySheets::new()
            .with_range(
                "'Entry Requirements'!A1:ZZ",
                &[&["Programme", "Maths", "English"], &["CS", "A", "B"], &["Law", "", "A"]],
            )
            .with_range(
                "Changelog!A2:G",
                &[&["2024-03-01 10:00:00", "ana@uni.edu", "Ana", "CS", "Maths", "", "A"]],
            )
    }

    #[tokio::test]
    async fn load_reads_records_and_changelog() {
        let sheets = sheets();
        let store = EntryStore::load(sheets.clone(), SheetLayout::default())
            .await
            .unwrap();

        assert_eq!(store.records().len(), 2);
        assert_eq!(store.audit().len(), 1);
        assert_eq!(store.last_updated("CS").unwrap().actor, "Ana");
        assert!(store.last_updated("Law").is_none());

        let mut reads = sheets.reads();
        reads.sort();
        assert_eq!(reads, ["'Entry Requirements'!A1:ZZ", "Changelog!A2:G"]);
    }

    #[tokio::test]
    async fn missing_changelog_is_tolerated() {
        let sheets = sheets();
        sheets.fail_read("Changelog!A2:G", "Unable to parse range: Changelog!A2:G");

        let store = EntryStore::load(sheets, SheetLayout::default()).await.unwrap();
        assert_eq!(store.records().len(), 2);
        assert!(store.audit().is_empty());
    }

    #[tokio::test]
    async fn failed_record_read_is_remote_read_error() {
        let sheets = sheets();
        sheets.fail_read("'Entry Requirements'!A1:ZZ", "Requested entity was not found.");

        let err = EntryStore::load(sheets, SheetLayout::default())
            .await
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "could not load records: Requested entity was not found."
        );
    }

    #[tokio::test]
    async fn header_only_sheet_is_schema_error() {
        let sheets = MemorySheets::new().with_range("'Entry Requirements'!A1:ZZ", &[&["Programme", "Maths"]]);
        let result = EntryStore::load(sheets, SheetLayout::default()).await;
        assert!(matches!(result, Err(StoreError::Schema(_))));
    }

    #[tokio::test]
    async fn reload_picks_up_remote_changes() {
        let sheets = sheets();
        let mut store = EntryStore::load(sheets.clone(), SheetLayout::default())
            .await
            .unwrap();

        let _ = sheets.clone().with_range(
            "'Entry Requirements'!A1:ZZ",
            &[&["Programme", "Maths", "English"], &["CS", "A", "B"]],
        );
        store.reload().await.unwrap();
        assert_eq!(store.records().len(), 1);
    }
}

use ereq_core::responses::{ProgrammeListResponse, ProgrammeSummary};
use ereq_store::{AuditLog, RecordCache};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::limit::as_count;
use crate::context::AppContext;
use crate::output::output_tabular;

/// Handle `ereq list`.
pub fn handle(args: &ListArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.session.store()?;
    let response = build(
        store.records(),
        store.audit(),
        args.search.as_deref(),
        flags.limit,
    );
    output_tabular(&response, flags.format)
}

fn build(
    records: &RecordCache,
    audit: &AuditLog,
    search: Option<&str>,
    limit: Option<u32>,
) -> ProgrammeListResponse {
    let total = u32::try_from(records.schema().qualification_names().len()).unwrap_or(u32::MAX);
    let matches: Vec<ProgrammeSummary> = records
        .find(search.unwrap_or_default())
        .map(|(_, record)| ProgrammeSummary {
            programme: record.key.clone(),
            filled: u32::try_from(records.filled_count(record)).unwrap_or(u32::MAX),
            total,
            percent_complete: records.percent_complete(record),
            last_updated: audit.last_updated(&record.key).cloned(),
        })
        .collect();
    let total_programmes = u32::try_from(matches.len()).unwrap_or(u32::MAX);

    ProgrammeListResponse {
        query: search.map(str::to_string),
        programmes: match limit {
            Some(limit) => matches.into_iter().take(as_count(limit)).collect(),
            None => matches,
        },
        total_programmes,
    }
}

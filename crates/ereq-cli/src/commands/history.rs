use ereq_core::responses::AuditListResponse;
use ereq_store::AuditLog;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProgrammeArgs;
use crate::commands::shared::limit::entry_count;
use crate::context::AppContext;
use crate::output::output_tabular;

/// Handle `ereq history`.
pub fn handle(args: &ProgrammeArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.session.store()?;
    let programme = &store.records().get_by_key(&args.programme)?.key;
    let limit = entry_count(flags.limit, ctx.config.general.entry_limit());
    output_tabular(&build(store.audit(), programme, limit), flags.format)
}

fn build(audit: &AuditLog, programme: &str, limit: usize) -> AuditListResponse {
    let entries = audit.entries_for(programme);
    AuditListResponse {
        programme: Some(programme.to_string()),
        total_entries: u32::try_from(entries.clone().count()).unwrap_or(u32::MAX),
        entries: entries.take(limit).cloned().collect(),
    }
}

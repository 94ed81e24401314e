use ereq_core::responses::AuditListResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::entry_count;
use crate::context::AppContext;
use crate::output::output_tabular;

/// Handle `ereq changelog`: the most recent changes across every programme.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audit = ctx.session.store()?.audit();
    let limit = entry_count(flags.limit, ctx.config.general.entry_limit());

    let response = AuditListResponse {
        programme: None,
        total_entries: u32::try_from(audit.len()).unwrap_or(u32::MAX),
        entries: audit.entries().iter().take(limit).cloned().collect(),
    };
    output_tabular(&response, flags.format)
}

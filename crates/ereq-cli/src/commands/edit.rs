use ereq_core::entities::FieldSchema;
use ereq_store::EditSession;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::commands::shared::fields::{parse_assignment, require_qualification};
use crate::commands::shared::save;
use crate::context::AppContext;
use crate::progress::{Phase, Progress};

/// Handle `ereq edit`: a full-form save of the current values plus the edits.
pub async fn handle(args: &EditArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.set.is_empty() && args.clear.is_empty() {
        anyhow::bail!("nothing to change: pass --set FIELD=VALUE or --clear FIELD");
    }

    let mut edit = ctx.session.begin_edit(&args.programme)?;
    apply_edits(
        &mut edit,
        ctx.session.store()?.records().schema(),
        &args.set,
        &args.clear,
    )?;

    let spinner = Progress::start(Phase::Save);
    let result = ctx.session.save_edit(&mut edit).await;
    save::report(&edit, result, &spinner, flags)
}

/// Apply `--set` then `--clear` to the draft, rejecting unknown fields.
fn apply_edits(
    edit: &mut EditSession,
    schema: &FieldSchema,
    set: &[String],
    clear: &[String],
) -> anyhow::Result<()> {
    for raw in set {
        let (field, value) = parse_assignment(raw)?;
        require_qualification(schema, &field)?;
        edit.set(&field, &value)?;
    }
    for field in clear {
        let field = field.trim();
        require_qualification(schema, field)?;
        edit.set(field, "")?;
    }
    Ok(())
}

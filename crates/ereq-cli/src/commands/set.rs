use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetArgs;
use crate::commands::shared::fields::require_qualification;
use crate::commands::shared::save;
use crate::context::AppContext;
use crate::progress::{Phase, Progress};

/// Handle `ereq set`: a quick single-cell save.
pub async fn handle(args: &SetArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let field = args.field.trim();
    require_qualification(ctx.session.store()?.records().schema(), field)?;

    let mut edit = ctx.session.begin_edit(&args.programme)?;
    edit.set(field, &args.value)?;

    let spinner = Progress::start(Phase::Save);
    let result = ctx.session.save_field(&mut edit, field).await;
    save::report(&edit, result, &spinner, flags)
}

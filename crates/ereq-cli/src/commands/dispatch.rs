use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => commands::list::handle(&args, ctx, flags),
        Commands::View(args) => commands::view::handle(&args, ctx, flags),
        Commands::Edit(args) => commands::edit::handle(&args, ctx, flags).await,
        Commands::Set(args) => commands::set::handle(&args, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags),
        Commands::Changelog => commands::changelog::handle(ctx, flags),
        Commands::Export(args) => commands::export::handle(&args, ctx),
        Commands::Setup(_) | Commands::Auth { .. } => {
            unreachable!("setup/auth are pre-dispatched in main")
        }
    }
}

mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `ereq auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &ereq_config::EreqConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login => login::handle(flags, config).await,
        AuthCommands::Logout => logout::handle(flags).await,
        AuthCommands::Status => status::handle(flags).await,
    }
}

use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with Google via the browser.
    Login,
    /// Revoke and clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

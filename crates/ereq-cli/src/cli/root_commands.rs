use clap::{Args, Subcommand};

use crate::cli::subcommands::AuthCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Save the spreadsheet and OAuth client to use.
    Setup(SetupArgs),
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// List programmes with how complete their requirements are.
    List(ListArgs),
    /// Show the requirements that apply to one programme.
    View(ProgrammeArgs),
    /// Save several fields of a programme at once.
    Edit(EditArgs),
    /// Quick-edit a single field of a programme.
    Set(SetArgs),
    /// Changes made to one programme, newest first.
    History(ProgrammeArgs),
    /// Most recent changes across all programmes.
    Changelog,
    /// Print a programme's requirements as a table for pasting elsewhere.
    Export(ExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SetupArgs {
    /// Spreadsheet id (the long id in the sheet URL).
    #[arg(long)]
    pub spreadsheet_id: String,
    /// Google OAuth client id.
    #[arg(long)]
    pub client_id: String,
    /// Google OAuth client secret (desktop clients).
    #[arg(long)]
    pub client_secret: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only programmes whose name contains this text (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ProgrammeArgs {
    /// Programme name, as in the first column of the sheet.
    pub programme: String,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    /// Programme name.
    pub programme: String,
    /// Set a field: "Field=Value". Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
    /// Empty a field. Repeatable.
    #[arg(long, value_name = "FIELD")]
    pub clear: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SetArgs {
    /// Programme name.
    pub programme: String,
    /// Qualification column to change.
    pub field: String,
    /// New value; pass "" to clear.
    pub value: String,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Programme name.
    pub programme: String,
    /// Export format: text, html
    #[arg(long = "as", default_value = "text")]
    pub kind: String,
}

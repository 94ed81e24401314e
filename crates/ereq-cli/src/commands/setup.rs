use ereq_config::{EreqConfig, SetupValues};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetupArgs;
use crate::output::output;

#[derive(Serialize)]
struct SetupResponse {
    saved: bool,
    path: String,
    next_step: &'static str,
}

/// Handle `ereq setup`.
pub fn handle(args: &SetupArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let values = SetupValues {
        spreadsheet_id: args.spreadsheet_id.clone(),
        client_id: args.client_id.clone(),
        client_secret: args
            .client_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
            .map(str::to_string),
    };
    let path = EreqConfig::save_setup(&values)?;
    tracing::debug!(path = %path.display(), "setup values saved");

    output(
        &SetupResponse {
            saved: true,
            path: path.display().to_string(),
            next_step: "ereq auth login",
        },
        flags.format,
    )
}

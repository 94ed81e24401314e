use std::time::Duration;

use anyhow::Context;
use ereq_sheets::SheetsClient;
use ereq_store::StoreError;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::layout;
use crate::output::output;
use crate::progress::{Phase, Progress};

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    access_granted: bool,
    email: String,
    name: String,
    initial: Option<char>,
    expires_at: Option<String>,
}

/// Sign in, then check the account against the access tab straight away.
pub async fn handle(flags: &GlobalFlags, config: &ereq_config::EreqConfig) -> anyhow::Result<()> {
    config.require_setup()?;

    let client = ereq_auth::OAuthClient {
        client_id: config.google.client_id.trim().to_string(),
        client_secret: config.google.client_secret().map(str::to_string),
    };
    if flags.shows_notes() {
        eprintln!("Opening the browser to sign in with Google…");
    }
    let token = ereq_auth::browser_flow::login(
        &client,
        Duration::from_secs(config.google.login_timeout_secs),
    )
    .await?;
    let profile = ereq_auth::fetch_profile(&token.access_token).await?;

    let spinner = Progress::start(Phase::LoadSheet);
    let sheets = SheetsClient::new(
        &config.sheets.api_base,
        &config.sheets.spreadsheet_id,
        &token.access_token,
    )
    .context("failed to build Sheets client")?;
    let access =
        ereq_store::access::verify(&sheets, &layout(&config.sheets), &profile.email).await;
    if access.is_err() {
        spinner.fail();
    } else {
        spinner.finish_clear();
    }
    check_access(access, &config.sheets.access_sheet)?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            access_granted: true,
            name: profile.display_name().to_string(),
            initial: profile.initial(),
            email: profile.email,
            expires_at: token.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}

/// Turn the access check into the message shown right after sign-in.
fn check_access(result: Result<(), StoreError>, access_sheet: &str) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(error @ StoreError::AccessDenied { .. }) => Err(anyhow::Error::new(error)
            .context("signed in, but this account cannot use the sheet; run `ereq auth logout` to switch accounts")),
        Err(error) => Err(anyhow::Error::new(error).context(format!(
            "could not verify access: make sure the \"{access_sheet}\" tab exists and the spreadsheet id is correct"
        ))),
    }
}

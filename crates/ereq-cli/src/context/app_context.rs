use anyhow::Context;
use ereq_config::{EreqConfig, SheetsConfig};
use ereq_sheets::{SheetLayout, SheetsClient};
use ereq_store::Session;

use crate::progress::{Phase, Progress};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: EreqConfig,
    pub session: Session<SheetsClient>,
}

impl AppContext {
    /// Resolve the stored sign-in, check access, and load the sheet.
    pub async fn init(config: EreqConfig) -> anyhow::Result<Self> {
        config.require_setup()?;

        let token = ereq_auth::resolve_token()?;
        let mut spinner = Progress::start(Phase::SignIn);
        let profile = match ereq_auth::fetch_profile(&token).await {
            Ok(profile) => profile,
            Err(error) => {
                spinner.fail();
                return Err(error.into());
            }
        };

        spinner.advance(Phase::LoadSheet);
        let sheets = SheetsClient::new(
            &config.sheets.api_base,
            &config.sheets.spreadsheet_id,
            &token,
        )
        .inspect_err(|_| spinner.fail())
        .context("failed to build Sheets client")?;

        match Session::open(sheets, layout(&config.sheets), profile).await {
            Ok(session) => {
                spinner.finish_clear();
                Ok(Self { config, session })
            }
            Err(error) => {
                spinner.fail();
                Err(error.into())
            }
        }
    }
}

pub fn layout(sheets: &SheetsConfig) -> SheetLayout {
    SheetLayout {
        records_sheet: sheets.records_sheet.clone(),
        audit_sheet: sheets.audit_sheet.clone(),
        access_sheet: sheets.access_sheet.clone(),
    }
}

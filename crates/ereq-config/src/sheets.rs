//! Spreadsheet location and tab names.

use serde::{Deserialize, Serialize};

fn default_records_sheet() -> String {
    "Entry Requirements".into()
}

fn default_audit_sheet() -> String {
    "Changelog".into()
}

fn default_access_sheet() -> String {
    "Access".into()
}

fn default_api_base() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Spreadsheet identifier (the long id in the sheet URL).
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Tab holding one row per programme; row 1 is the header.
    #[serde(default = "default_records_sheet")]
    pub records_sheet: String,

    /// Append-only changelog tab, columns A–G.
    #[serde(default = "default_audit_sheet")]
    pub audit_sheet: String,

    /// Allow-list tab; column A holds permitted email addresses.
    #[serde(default = "default_access_sheet")]
    pub access_sheet: String,

    /// Base URL of the Sheets values API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            records_sheet: default_records_sheet(),
            audit_sheet: default_audit_sheet(),
            access_sheet: default_access_sheet(),
            api_base: default_api_base(),
        }
    }
}

impl SheetsConfig {
    /// Check if a spreadsheet has been chosen.
    pub fn is_configured(&self) -> bool {
        !self.spreadsheet_id.trim().is_empty()
    }
}

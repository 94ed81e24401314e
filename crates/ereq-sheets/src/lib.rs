//! # ereq-sheets
//!
//! Google Sheets values API client.
//!
//! The [`SheetsApi`] trait is the seam the record store talks through: bulk
//! range reads, single-range overwrites (`valueInputOption=RAW`) and row
//! appends (`insertDataOption=INSERT_ROWS`). [`SheetsClient`] implements it
//! over HTTPS with a bearer token.

pub mod a1;
mod error;
mod http;
pub mod layout;

pub use error::SheetsError;
pub use http::error_message;
pub use layout::SheetLayout;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows of cells as plain strings.
pub type Rows = Vec<Vec<String>>;

// ── Trait ──────────────────────────────────────────────────────────

/// Remote spreadsheet operations used by the record store.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Read every row of `range`. A range with no values yields no rows.
    async fn read_range(&self, range: &str) -> Result<Rows, SheetsError>;

    /// Overwrite `range` with `rows`, stored verbatim.
    async fn overwrite_range(&self, range: &str, rows: Rows) -> Result<(), SheetsError>;

    /// Append `rows` after the last row of the table at `range`.
    async fn append_rows(&self, range: &str, rows: Rows) -> Result<(), SheetsError>;
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a Rows,
}

#[derive(Serialize)]
struct AppendBody<'a> {
    values: &'a Rows,
}

/// Render a cell as text. Formatted reads only return strings, but numbers
/// and booleans are accepted too.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTPS client for one spreadsheet, authorized with a bearer token.
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsClient {
    /// Create a client for `spreadsheet_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        api_base: &str,
        spreadsheet_id: &str,
        access_token: &str,
    ) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ereq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{suffix}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range)
        )
    }
}

#[async_trait]
impl SheetsApi for SheetsClient {
    async fn read_range(&self, range: &str) -> Result<Rows, SheetsError> {
        tracing::debug!(range, "sheets: read");
        let resp = self
            .http
            .get(self.values_url(range, ""))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let resp = http::check_response(resp).await?;

        let data: ValueRangeResponse = resp
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;
        Ok(data
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn overwrite_range(&self, range: &str, rows: Rows) -> Result<(), SheetsError> {
        tracing::debug!(range, rows = rows.len(), "sheets: overwrite");
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values: &rows,
        };
        let resp = self
            .http
            .put(self.values_url(range, "?valueInputOption=RAW"))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        http::check_response(resp).await?;
        Ok(())
    }

    async fn append_rows(&self, range: &str, rows: Rows) -> Result<(), SheetsError> {
        tracing::debug!(range, rows = rows.len(), "sheets: append");
        let resp = self
            .http
            .post(self.values_url(
                range,
                ":append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            ))
            .bearer_auth(&self.access_token)
            .json(&AppendBody { values: &rows })
            .send()
            .await?;
        http::check_response(resp).await?;
        Ok(())
    }
}

//! Audit timestamps.
//!
//! The changelog sheet stores timestamps as plain text in UTC using
//! `YYYY-MM-DD HH:MM:SS`. Values are generated at write time, never supplied
//! by callers.

use chrono::{DateTime, Utc};

/// `strftime` pattern of every timestamp written to the changelog.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an instant in the changelog format.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The current instant in the changelog format.
#[must_use]
pub fn now() -> String {
    format_timestamp(Utc::now())
}

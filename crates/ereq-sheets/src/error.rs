//! Sheets client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Sheets values API.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    ///
    /// `message` is the API's own error message when the body carried one,
    /// otherwise `HTTP <status>`.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Human-readable error message.
        message: String,
    },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SheetsError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}

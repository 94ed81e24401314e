//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks so the client methods stay focused on
//! request construction and response mapping. Google APIs report failures as
//! `{"error": {"code": 403, "message": "...", "status": "..."}}`; the message
//! is surfaced verbatim, falling back to `HTTP <status>`.

use serde::Deserialize;

use crate::error::SheetsError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Code(String),
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`SheetsError::Api`] with the best available message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

/// Extract the API error message from a response body.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| match envelope.error {
            ErrorBody::Detailed { message } | ErrorBody::Code(message) => message,
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn message_from_google_error_body() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(403, body), "The caller does not have permission");
    }

    #[test]
    fn message_from_oauth_style_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Bad Request"}"#;
        assert_eq!(error_message(400, body), "invalid_grant");
    }

    #[test]
    fn message_falls_back_to_status() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP 502");
        assert_eq!(error_message(500, ""), "HTTP 500");
        assert_eq!(error_message(400, r#"{"error":{"message":""}}"#), "HTTP 400");
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let resp = mock_response(
            404,
            r#"{"error":{"code":404,"message":"Requested entity was not found."}}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status: 404, .. }));
        assert_eq!(err.to_string(), "Requested entity was not found.");
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }
}

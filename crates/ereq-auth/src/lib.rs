//! # ereq-auth
//!
//! Google sign-in for the entry requirements CLI.
//!
//! Provides the loopback browser login (`tiny_http` + `open`), profile lookup
//! against the userinfo endpoint, OS keychain token storage (`keyring`) with
//! an env var fallback for CI, and sign-out with token revocation.

pub mod browser_flow;
pub mod error;
pub mod profile;
pub mod token_store;

pub use browser_flow::OAuthClient;
pub use error::AuthError;
pub use profile::fetch_profile;

/// Sheet read/write plus the user's identity.
pub const SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
];

pub(crate) const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub(crate) const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub(crate) const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";
pub(crate) const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Resolve a usable access token.
///
/// Priority: keyring → env var → file. Tokens are not refreshed; an expired
/// one means signing in again.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` when no token is stored and
/// `AuthError::TokenExpired` when the stored one has lapsed.
pub fn resolve_token() -> Result<String, AuthError> {
    let token = token_store::load().ok_or(AuthError::NotAuthenticated)?;
    if token.is_expired_at(chrono::Utc::now()) {
        return Err(AuthError::TokenExpired);
    }
    Ok(token.access_token)
}

/// Sign out: revoke the stored token with Google, then forget it locally.
///
/// Revocation is best-effort; a network failure is logged and the local
/// credentials are still removed.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub async fn logout() -> Result<(), AuthError> {
    if let Some(token) = token_store::load() {
        let body = format!("token={}", urlencoding::encode(&token.access_token));
        let result = reqwest::Client::new()
            .post(REVOKE_URL)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => tracing::debug!("token revoked"),
            Ok(resp) => tracing::warn!(status = resp.status().as_u16(), "token revocation refused"),
            Err(error) => tracing::warn!(%error, "token revocation failed"),
        }
    }
    token_store::delete()
}

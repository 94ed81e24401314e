use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in, run `ereq auth login`")]
    NotAuthenticated,

    #[error("access token expired, run `ereq auth login` again")]
    TokenExpired,

    /// The identity provider refused the sign-in; its text is kept verbatim.
    #[error("sign-in failed: {error}{}", detail(.description))]
    Provider {
        error: String,
        description: Option<String>,
    },

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("signed in but could not fetch profile: {0}")]
    Profile(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

fn detail(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!("\n{d}"))
        .unwrap_or_default()
}

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    email: Option<String>,
    name: Option<String>,
    initial: Option<char>,
    expires_at: Option<String>,
    token_source: Option<String>,
    note: Option<String>,
}

impl AuthStatusResponse {
    fn signed_out(note: String) -> Self {
        Self {
            authenticated: false,
            email: None,
            name: None,
            initial: None,
            expires_at: None,
            token_source: None,
            note: Some(note),
        }
    }
}

pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match ereq_auth::token_store::load() {
        None => AuthStatusResponse::signed_out("no stored token, run `ereq auth login`".into()),
        Some(token) if token.is_expired_at(chrono::Utc::now()) => {
            AuthStatusResponse::signed_out(ereq_auth::AuthError::TokenExpired.to_string())
        }
        Some(token) => match ereq_auth::fetch_profile(&token.access_token).await {
            Ok(profile) => AuthStatusResponse {
                authenticated: true,
                name: Some(profile.display_name().to_string()),
                initial: profile.initial(),
                email: Some(profile.email),
                expires_at: token.expires_at.map(|at| at.to_rfc3339()),
                token_source: ereq_auth::token_store::detect_token_source(),
                note: None,
            },
            Err(error) => AuthStatusResponse::signed_out(error.to_string()),
        },
    };

    output(&status, flags.format)
}

use ereq_core::entities::UserProfile;
use serde::Deserialize;

use crate::USERINFO_URL;
use crate::error::AuthError;

#[derive(Deserialize)]
struct UserInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Look up the signed-in user's email, display name, and avatar.
///
/// # Errors
///
/// Returns `AuthError::TokenExpired` when Google rejects the token and
/// `AuthError::Profile` for any other failure.
pub async fn fetch_profile(access_token: &str) -> Result<UserProfile, AuthError> {
    let resp = reqwest::Client::new()
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AuthError::TokenExpired);
    }
    if !status.is_success() {
        return Err(AuthError::Profile(format!("HTTP {}", status.as_u16())));
    }

    let text = resp.text().await?;
    parse_profile(&text)
}

fn parse_profile(text: &str) -> Result<UserProfile, AuthError> {
    let info: UserInfo =
        serde_json::from_str(text).map_err(|e| AuthError::Profile(e.to_string()))?;
    let email = info
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AuthError::Profile("no email on account".into()))?;
    Ok(UserProfile {
        email: email.trim().to_lowercase(),
        name: info.name.filter(|n| !n.trim().is_empty()),
        picture: info.picture.filter(|p| !p.is_empty()),
    })
}

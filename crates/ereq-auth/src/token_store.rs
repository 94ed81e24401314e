use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "ereq-cli";
const KEYRING_USER: &str = "google-oauth";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "EREQ_AUTH__TOKEN";

/// An access token as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    /// `None` when the expiry is unknown (e.g. a token passed via env).
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Parse a stored credential. Accepts the JSON form and, for tokens
    /// written by hand, a bare access token.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok().or_else(|| {
            Some(Self {
                access_token: raw.to_string(),
                expires_at: None,
            })
        })
    }
}

/// Returns the keyring service name.
///
/// Defaults to `"ereq-cli"`. Override via `EREQ_KEYRING_SERVICE` env var for
/// testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("EREQ_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a token in the OS keychain. Falls back to file if keyring unavailable.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn store(token: &StoredToken) -> Result<(), AuthError> {
    let serialized = serde_json::to_string(token)
        .map_err(|e| AuthError::TokenStoreError(format!("serialize token: {e}")))?;

    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&serialized) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&serialized)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&serialized)
        }
    }
}

/// Load a token. Priority: keyring → `EREQ_AUTH__TOKEN` env → file (`~/.ereq/credentials`).
#[must_use]
pub fn load() -> Option<StoredToken> {
    // 1. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(raw) = entry.get_password()
        && let Some(token) = StoredToken::parse(&raw)
    {
        return Some(token);
    }

    // 2. Environment variable
    if let Ok(raw) = std::env::var(TOKEN_ENV)
        && let Some(token) = StoredToken::parse(&raw)
    {
        return Some(token);
    }

    // 3. File fallback
    load_file()
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    // Delete from keyring (may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

/// Detect which tier the current token came from (for status display).
#[must_use]
pub fn detect_token_source() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|t| !t.trim().is_empty())
    {
        return Some("keyring".into());
    }
    if std::env::var(TOKEN_ENV).is_ok_and(|t| !t.trim().is_empty()) {
        return Some("env".into());
    }
    if load_file().is_some() {
        return Some("file".into());
    }
    None
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".ereq").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
}

fn store_file(serialized: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, serialized)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<StoredToken> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .and_then(|raw| StoredToken::parse(&raw))
}

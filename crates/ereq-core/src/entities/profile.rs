use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The signed-in user, as reported by the identity provider.
///
/// Produced by `ereq-auth`, consumed by `ereq-store` to stamp audit entries
/// and by `ereq-cli` for display.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// Name to show for this user: the profile name, else the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Upper-cased first letter of the display name, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.display_name()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

//! Google OAuth client configuration.

use serde::{Deserialize, Serialize};

const fn default_login_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// OAuth client identifier.
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret. Desktop clients ship one; it is not confidential.
    #[serde(default)]
    pub client_secret: String,

    /// How long `ereq auth login` waits for the browser callback.
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            login_timeout_secs: default_login_timeout_secs(),
        }
    }
}

impl GoogleConfig {
    /// Check if an OAuth client has been configured.
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }

    /// The client secret, if one is set.
    pub fn client_secret(&self) -> Option<&str> {
        let secret = self.client_secret.trim();
        (!secret.is_empty()).then_some(secret)
    }
}

//! Listing defaults.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How many changelog entries `history` and `changelog` print when no
    /// `--limit` is given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl GeneralConfig {
    /// The configured limit, with 0 read as "use the built-in default".
    #[must_use]
    pub const fn entry_limit(&self) -> u32 {
        if self.default_limit == 0 {
            default_limit()
        } else {
            self.default_limit
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

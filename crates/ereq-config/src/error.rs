//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration section is not configured.
    #[error("Configuration section '{section}' is not configured (run `ereq setup`)")]
    NotConfigured { section: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// The user config file could not be read or written.
    #[error("Failed to persist configuration to {path}: {reason}")]
    Persist { path: String, reason: String },
}

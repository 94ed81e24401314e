//! # ereq-config
//!
//! Layered configuration loading for `ereq` using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EREQ_*` prefix, `__` as separator)
//! 2. Project-level `.ereq/config.toml`
//! 3. User-level `~/.config/ereq/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EREQ_SHEETS__SPREADSHEET_ID` -> `sheets.spreadsheet_id`,
//! `EREQ_GOOGLE__CLIENT_ID` -> `google.client_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ereq_config::EreqConfig;
//!
//! let config = EreqConfig::load_with_dotenv().expect("config");
//! if !config.sheets.is_configured() {
//!     eprintln!("run `ereq setup` first");
//! }
//! ```

mod error;
mod general;
mod google;
mod sheets;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use google::GoogleConfig;
pub use sheets::SheetsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides the directory holding the user-global `config.toml`.
const CONFIG_HOME_ENV: &str = "EREQ_CONFIG_HOME";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EreqConfig {
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Values captured by `ereq setup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupValues {
    pub spreadsheet_id: String,
    pub client_id: String,
    pub client_secret: Option<String>,
}

impl EreqConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ereq/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("EREQ_").split("__"))
    }

    /// Fail with `ConfigError::NotConfigured` unless both the spreadsheet and
    /// the OAuth client are set.
    ///
    /// # Errors
    ///
    /// Names the first missing section.
    pub fn require_setup(&self) -> Result<(), ConfigError> {
        if !self.sheets.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "sheets".into(),
            });
        }
        if !self.google.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "google".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    ///
    /// `EREQ_CONFIG_HOME` replaces the platform config directory.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_HOME_ENV)
            && !dir.is_empty()
        {
            return Some(PathBuf::from(dir).join("config.toml"));
        }
        dirs::config_dir().map(|p| p.join("ereq").join("config.toml"))
    }

    /// Persist setup values into the user-global config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for blank values, or
    /// `ConfigError::Persist` if the file cannot be written.
    pub fn save_setup(values: &SetupValues) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path().ok_or_else(|| ConfigError::Persist {
            path: "<config dir>".into(),
            reason: "no config directory for this platform".into(),
        })?;
        save_setup_to(&path, values)?;
        Ok(path)
    }
}

/// Merge setup values into the TOML file at `path`, keeping every other key.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for blank values, or
/// `ConfigError::Persist` if the file cannot be read, parsed, or written.
pub fn save_setup_to(path: &Path, values: &SetupValues) -> Result<(), ConfigError> {
    let spreadsheet_id = required("sheets.spreadsheet_id", &values.spreadsheet_id)?;
    let client_id = required("google.client_id", &values.client_id)?;

    let persist_err = |reason: String| ConfigError::Persist {
        path: path.display().to_string(),
        reason,
    };

    let mut doc: toml::Table = if path.exists() {
        let text = std::fs::read_to_string(path).map_err(|e| persist_err(e.to_string()))?;
        text.parse().map_err(|e: toml::de::Error| persist_err(e.to_string()))?
    } else {
        toml::Table::new()
    };

    let sheets = section(&mut doc, "sheets").map_err(persist_err)?;
    sheets.insert("spreadsheet_id".into(), spreadsheet_id.into());

    let google = section(&mut doc, "google").map_err(persist_err)?;
    google.insert("client_id".into(), client_id.into());
    if let Some(secret) = values.client_secret.as_deref().map(str::trim)
        && !secret.is_empty()
    {
        google.insert("client_secret".into(), secret.into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;
    }
    let text = toml::to_string_pretty(&doc).map_err(|e| persist_err(e.to_string()))?;
    std::fs::write(path, text).map_err(|e| persist_err(e.to_string()))?;

    tracing::debug!(path = %path.display(), "saved setup values");
    Ok(())
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(value)
}

fn section<'a>(doc: &'a mut toml::Table, name: &str) -> Result<&'a mut toml::Table, String> {
    doc.entry(name)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| format!("'{name}' is not a table"))
}

use anyhow::Context;
use ereq_config::EreqConfig;

/// Load `.env` from the working directory (if any), then the layered config.
pub fn load_config() -> anyhow::Result<EreqConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env"),
    }

    EreqConfig::load().context("failed to load configuration")
}

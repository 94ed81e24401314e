use ereq_config::EreqConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &EreqConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &EreqConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.sheets.is_configured() && has_env_prefix(&env_keys, "EREQ_SHEETS") {
        warnings.push(
            "Sheets config appears default while EREQ_SHEETS* env vars exist. Use double underscores (example: EREQ_SHEETS__SPREADSHEET_ID)."
                .to_string(),
        );
    }

    if !config.google.is_configured() && has_env_prefix(&env_keys, "EREQ_GOOGLE") {
        warnings.push(
            "Google config appears default while EREQ_GOOGLE* env vars exist. Use double underscores (example: EREQ_GOOGLE__CLIENT_ID)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

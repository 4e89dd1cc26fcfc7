use kih_config::{ENV_PREFIX, KihConfig, SECTIONS};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &KihConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &KihConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    SECTIONS
        .iter()
        .filter(|section| !section_configured(config, section))
        .filter_map(|section| {
            let prefix = format!("{ENV_PREFIX}{}", section.to_uppercase());
            has_env_prefix(&env_keys, &prefix).then(|| {
                format!(
                    "{section} config appears default while {prefix}* env vars exist. Use double underscores (example: {prefix}__{}).",
                    example_key(section)
                )
            })
        })
        .collect()
}

fn section_configured(config: &KihConfig, section: &str) -> bool {
    match section {
        "store" => config.store.is_configured(),
        "auth" => config.auth.is_configured(),
        "media" => config.media.is_configured(),
        "analytics" => config.analytics.is_configured(),
        // General always has usable defaults.
        _ => true,
    }
}

fn example_key(section: &str) -> &'static str {
    match section {
        "store" => "URL",
        "auth" => "API_KEY",
        "media" => "BUCKET_NAME",
        "analytics" => "MEASUREMENT_ID",
        _ => "DEFAULT_LIMIT",
    }
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

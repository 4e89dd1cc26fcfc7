use figment::Jail;
use kih_config::KihConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("KIH_STORE__URL", "libsql://env.turso.io");
        jail.set_env("KIH_STORE__AUTH_TOKEN", "env-token");
        jail.set_env("KIH_ANALYTICS__MEASUREMENT_ID", "G-ENV");
        jail.set_env("KIH_ANALYTICS__API_SECRET", "secret");

        let config = KihConfig::load().expect("config loads");
        assert_eq!(config.store.url, "libsql://env.turso.io");
        assert!(config.store.is_configured());
        assert!(config.analytics.is_configured());
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".kih")?;
        jail.create_file(
            ".kih/config.toml",
            r#"
[auth]
api_key = "from-toml"
"#,
        )?;
        jail.set_env("KIH_AUTH__API_KEY", "from-env");

        let config = KihConfig::load().expect("config loads");
        assert_eq!(config.auth.api_key, "from-env");
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("KIH_GENERAL__DEFAULT_LIMIT", "50");
        let config = KihConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

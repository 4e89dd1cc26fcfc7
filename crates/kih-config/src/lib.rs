//! # kih-config
//!
//! Layered configuration loading for the portal using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KIH_*` prefix, `__` as separator)
//! 2. Project-level `.kih/config.toml`
//! 3. User-level `~/.config/kih/config.toml`
//! 4. Built-in defaults
//!
//! `KIH_STORE__URL` maps to `store.url`, `KIH_AUTH__API_KEY` to
//! `auth.api_key`, and so on.
//!
//! ```no_run
//! use kih_config::KihConfig;
//!
//! let config = KihConfig::load_with_dotenv().expect("config");
//! if config.store.is_configured() {
//!     println!("remote store: {}", config.store.url);
//! }
//! ```

mod analytics;
mod auth;
mod error;
mod general;
mod media;
mod store;

pub use analytics::AnalyticsConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use media::MediaConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env prefix for every setting.
pub const ENV_PREFIX: &str = "KIH_";

/// Top-level config sections, used for env-var sanity checks.
pub const SECTIONS: &[&str] = &["store", "auth", "media", "analytics", "general"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KihConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl KihConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working tree, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".kih/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Fail with [`ConfigError::NotConfigured`] unless `ready`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming `section`.
    pub fn require(section: &str, ready: bool) -> Result<(), ConfigError> {
        if ready {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: section.to_string(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kih").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` looking for `.env`, else try the
    /// current directory. Missing files are ignored.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = KihConfig::default();
        assert!(!config.store.is_configured());
        assert!(!config.auth.is_configured());
        assert!(!config.media.is_configured());
        assert!(!config.analytics.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn require_reports_section() {
        let err = KihConfig::require("media", false).unwrap_err();
        assert!(err.to_string().contains("'media'"));
        assert!(err.to_string().contains("KIH_MEDIA"));
        assert!(KihConfig::require("media", true).is_ok());
    }
}

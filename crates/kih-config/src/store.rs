//! Document store (libSQL) configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    String::from(".kih/portal.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Remote database URL (e.g., `libsql://kih-portal.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Remote database auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file used when no remote store is configured.
    /// `:memory:` keeps everything in process.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
        }
    }
}

impl StoreConfig {
    /// Whether the remote store has a URL and token.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    pub fn is_in_memory(&self) -> bool {
        self.local_path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_local_file() {
        let config = StoreConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.local_path, ".kih/portal.db");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn url_without_token_is_not_remote() {
        let config = StoreConfig {
            url: "libsql://kih-portal.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}

//! Identity provider configuration.

use serde::{Deserialize, Serialize};

fn default_identity_url() -> String {
    String::from("https://identitytoolkit.googleapis.com/v1")
}

fn default_token_url() -> String {
    String::from("https://securetoken.googleapis.com/v1")
}

const fn default_callback_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Web API key of the identity project.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the account endpoints (`accounts:signInWithPassword`, ...).
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Base URL of the token refresh endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// OAuth client used for Google sign-in.
    #[serde(default)]
    pub google_client_id: String,

    /// Installed-app client secret paired with `google_client_id`.
    #[serde(default)]
    pub google_client_secret: String,

    /// How long the browser sign-in waits for its callback.
    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            identity_url: default_identity_url(),
            token_url: default_token_url(),
            google_client_id: String::new(),
            google_client_secret: String::new(),
            callback_timeout_secs: default_callback_timeout_secs(),
        }
    }
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Google sign-in additionally needs an OAuth client.
    pub fn google_enabled(&self) -> bool {
        self.is_configured() && !self.google_client_id.is_empty()
    }
}

//! Object storage configuration for listing photos.

use serde::{Deserialize, Serialize};

fn default_bucket_name() -> String {
    String::from("kih-media")
}

fn default_region() -> String {
    String::from("auto")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// S3-compatible endpoint URL.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Public URL prefix under which uploaded objects are served.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket_name: default_bucket_name(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
        }
    }
}

impl MediaConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
            && !self.bucket_name.is_empty()
            && !self.public_base_url.is_empty()
    }

    /// Public URL of an object key.
    pub fn public_url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

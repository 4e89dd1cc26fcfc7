//! Optional page-view analytics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Measurement stream id (e.g., `G-XXXXXXX`).
    #[serde(default)]
    pub measurement_id: String,

    /// Measurement protocol API secret.
    #[serde(default)]
    pub api_secret: String,
}

impl AnalyticsConfig {
    /// Analytics only exists when both credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.measurement_id.is_empty() && !self.api_secret.is_empty()
    }
}

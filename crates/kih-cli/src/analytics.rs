//! Best-effort page-view reporting over the measurement protocol.
//!
//! An [`Analytics`] handle only exists when both measurement credentials are
//! configured. Sending never fails a command: errors are logged and dropped.

use std::time::Duration;

use kih_config::AnalyticsConfig;
use serde_json::{Value, json};

const COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";

pub struct Analytics {
    http: reqwest::Client,
    endpoint: String,
    measurement_id: String,
    api_secret: String,
    client_id: String,
}

impl Analytics {
    /// `None` unless analytics is configured and an HTTP client can be built.
    pub fn from_config(config: &AnalyticsConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let http = match reqwest::Client::builder()
            .user_agent(concat!("kih/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(3))
            .build()
        {
            Ok(http) => http,
            Err(error) => {
                tracing::warn!(%error, "analytics disabled: cannot build http client");
                return None;
            }
        };
        Some(Self {
            http,
            endpoint: COLLECT_URL.to_string(),
            measurement_id: config.measurement_id.clone(),
            api_secret: config.api_secret.clone(),
            client_id: client_id(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    fn page_view_payload(&self, path: &str, title: &str) -> Value {
        json!({
            "client_id": self.client_id,
            "events": [{
                "name": "page_view",
                "params": {
                    "page_location": path,
                    "page_title": title,
                    "engagement_time_msec": 1,
                }
            }]
        })
    }

    /// Report a page view. Never fails.
    pub async fn page_view(&self, path: &str, title: &str) {
        let result = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("measurement_id", self.measurement_id.as_str()),
                ("api_secret", self.api_secret.as_str()),
            ])
            .json(&self.page_view_payload(path, title))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        match result {
            Ok(_) => tracing::debug!(path, "page view sent"),
            Err(error) => tracing::debug!(path, %error, "page view dropped"),
        }
    }
}

/// Anonymous per-process client id in the `random.timestamp` form.
fn client_id() -> String {
    let mut bytes = [0u8; 4];
    let random = if getrandom::fill(&mut bytes).is_ok() {
        u32::from_le_bytes(bytes)
    } else {
        std::process::id()
    };
    format!("{random}.{}", chrono::Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn configured() -> AnalyticsConfig {
        AnalyticsConfig {
            measurement_id: "G-TEST123".into(),
            api_secret: "secret".into(),
        }
    }

    #[test]
    fn absent_without_both_credentials() {
        assert!(Analytics::from_config(&AnalyticsConfig::default()).is_none());
        let half = AnalyticsConfig {
            measurement_id: "G-TEST123".into(),
            api_secret: String::new(),
        };
        assert!(Analytics::from_config(&half).is_none());
        assert!(Analytics::from_config(&configured()).is_some());
    }

    #[test]
    fn payload_names_page_view() {
        let analytics = Analytics::from_config(&configured()).unwrap();
        let payload = analytics.page_view_payload("/kos-homestay", "Kos & Homestay");
        assert_eq!(payload["events"][0]["name"], "page_view");
        assert_eq!(payload["events"][0]["params"]["page_location"], "/kos-homestay");
        assert!(payload["client_id"].as_str().unwrap().contains('.'));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_swallowed() {
        let analytics = Analytics::from_config(&configured())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/mp/collect");
        analytics.page_view("/courses", "Kursus").await;
    }
}

use std::path::Path;

use anyhow::Context;
use kih_auth::{IdentityClient, SessionHub};
use kih_config::KihConfig;
use kih_core::identity::UserSnapshot;
use kih_db::PortalService;
use kih_media::MediaStore;

use crate::analytics::Analytics;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: PortalService,
    pub config: KihConfig,
    pub hub: &'static SessionHub,
    pub media: Option<MediaStore>,
    pub analytics: Option<Analytics>,
}

impl AppContext {
    /// Resolve the session, then open the store and optional capabilities.
    pub async fn init(config: KihConfig) -> anyhow::Result<Self> {
        let hub = SessionHub::global();
        let identity = identity_client(&config);

        // Publishes the resolved state to the hub either way.
        if let Err(error) = kih_auth::resolve_session(identity.as_ref(), hub).await {
            tracing::warn!(%error, "could not refresh stored session; continuing signed out");
        }

        let service = open_service(&config).await?;

        let media = if config.media.is_configured() {
            match MediaStore::from_config(&config.media) {
                Ok(media) => Some(media),
                Err(error) => {
                    tracing::warn!(%error, "media store unavailable; photo uploads disabled");
                    None
                }
            }
        } else {
            None
        };

        let analytics = Analytics::from_config(&config.analytics);

        Ok(Self {
            service,
            config,
            hub,
            media,
            analytics,
        })
    }

    /// The signed-in user, if any.
    pub fn viewer(&self) -> Option<UserSnapshot> {
        self.hub.current_user()
    }

    pub fn require_user(&self) -> anyhow::Result<UserSnapshot> {
        self.viewer()
            .context("not signed in; run `kih auth login` first")
    }

    pub fn require_media(&self) -> anyhow::Result<&MediaStore> {
        KihConfig::require("media", self.config.media.is_configured())?;
        self.media
            .as_ref()
            .context("media store could not be initialized; see the warning above")
    }

    /// Report a page view when analytics is configured.
    pub async fn track_page_view(&self, path: &str, title: &str) {
        if let Some(analytics) = &self.analytics {
            analytics.page_view(path, title).await;
        }
    }
}

fn identity_client(config: &KihConfig) -> Option<IdentityClient> {
    if !config.auth.is_configured() {
        return None;
    }
    match IdentityClient::new(&config.auth) {
        Ok(client) => Some(client),
        Err(error) => {
            tracing::warn!(%error, "identity provider unavailable");
            None
        }
    }
}

/// Remote store when configured, falling back to the local file.
async fn open_service(config: &KihConfig) -> anyhow::Result<PortalService> {
    if config.store.is_configured() {
        match PortalService::new_remote(&config.store.url, &config.store.auth_token).await {
            Ok(service) => return Ok(service),
            Err(error) => {
                tracing::warn!(%error, "failed to open remote store; falling back to local");
            }
        }
    }

    let local_path = &config.store.local_path;
    if !config.store.is_in_memory() {
        if let Some(parent) = Path::new(local_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create store directory {}", parent.display())
                })?;
            }
        }
    }

    PortalService::new_local(local_path)
        .await
        .with_context(|| format!("failed to open local store at {local_path}"))
}

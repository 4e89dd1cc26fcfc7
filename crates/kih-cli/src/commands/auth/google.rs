use std::time::Duration;

use kih_auth::SessionHub;
use kih_auth::google::{self, GoogleClient};
use kih_config::KihConfig;

use super::{SignedInResponse, identity_client};
use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `kih auth google`: browser sign-in through a loopback callback.
pub async fn handle(flags: &GlobalFlags, config: &KihConfig) -> anyhow::Result<()> {
    let identity = identity_client(config)?;
    if !config.auth.google_enabled() {
        anyhow::bail!(
            "Google sign-in needs auth.google_client_id and auth.google_client_secret (KIH_AUTH__GOOGLE_CLIENT_ID, KIH_AUTH__GOOGLE_CLIENT_SECRET)"
        );
    }

    let client = GoogleClient {
        client_id: config.auth.google_client_id.clone(),
        client_secret: config.auth.google_client_secret.clone(),
    };
    let timeout = Duration::from_secs(config.auth.callback_timeout_secs);

    let session = google::sign_in(&identity, &client, timeout).await?;
    kih_auth::complete_sign_in(&session, SessionHub::global())?;

    output(&SignedInResponse::from(&session), flags.format)
}

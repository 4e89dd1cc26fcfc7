use kih_auth::session::EXPIRY_BUFFER_SECS;
use kih_auth::token_store;
use kih_core::identity::UserSnapshot;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<UserSnapshot>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

/// Handle `kih auth status`. Reads stored credentials only; no network.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match token_store::load_with_source() {
        Some((session, source)) => {
            let note = session
                .is_near_expiry(EXPIRY_BUFFER_SECS)
                .then(|| String::from("session expires soon; the next command refreshes it"));
            AuthStatusResponse {
                authenticated: true,
                user: Some(session.user),
                expires_at: Some(session.expires_at.to_rfc3339()),
                token_source: Some(source.as_str()),
                note,
            }
        }
        None => AuthStatusResponse {
            authenticated: false,
            user: None,
            expires_at: None,
            token_source: None,
            note: Some("no stored session; run `kih auth login`".into()),
        },
    };

    output(&status, flags.format)
}

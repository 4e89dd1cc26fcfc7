use kih_auth::SessionHub;
use kih_config::KihConfig;

use super::{SignedInResponse, identity_client, read_password};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `kih auth login`.
pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &KihConfig,
) -> anyhow::Result<()> {
    let identity = identity_client(config)?;
    let password = read_password(args.password.as_deref())?;

    let session = with_spinner(
        "Signing in...",
        "Sign-in failed",
        identity.sign_in_with_password(args.email.trim(), &password),
    )
    .await?;
    kih_auth::complete_sign_in(&session, SessionHub::global())?;

    output(&SignedInResponse::from(&session), flags.format)
}

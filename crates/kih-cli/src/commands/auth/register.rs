use kih_auth::SessionHub;
use kih_config::KihConfig;

use super::{SignedInResponse, identity_client, read_password};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `kih auth register`. A new account is signed in right away.
pub async fn handle(
    args: &AuthRegisterArgs,
    flags: &GlobalFlags,
    config: &KihConfig,
) -> anyhow::Result<()> {
    let identity = identity_client(config)?;
    let password = read_password(args.password.as_deref())?;
    let name = args
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let session = with_spinner(
        "Creating account...",
        "Registration failed",
        identity.sign_up(args.email.trim(), &password, name),
    )
    .await?;
    kih_auth::complete_sign_in(&session, SessionHub::global())?;

    output(&SignedInResponse::from(&session), flags.format)
}

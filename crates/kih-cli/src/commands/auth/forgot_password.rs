use kih_config::KihConfig;
use serde::Serialize;

use super::identity_client;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthForgotPasswordArgs;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct ResetResponse {
    sent: bool,
    email: String,
    message: &'static str,
}

/// Handle `kih auth forgot-password`.
pub async fn handle(
    args: &AuthForgotPasswordArgs,
    flags: &GlobalFlags,
    config: &KihConfig,
) -> anyhow::Result<()> {
    let identity = identity_client(config)?;
    let email = args.email.trim();

    with_spinner(
        "Sending reset link...",
        "Reset request failed",
        identity.send_password_reset(email),
    )
    .await?;

    output(
        &ResetResponse {
            sent: true,
            email: email.to_string(),
            message: "Link reset password telah dikirim ke email Anda.",
        },
        flags.format,
    )
}

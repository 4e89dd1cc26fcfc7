mod forgot_password;
mod google;
mod login;
mod logout;
mod register;
mod status;

use std::io::BufRead;

use anyhow::Context;
use kih_auth::{AuthSession, IdentityClient};
use kih_config::KihConfig;
use kih_core::identity::UserSnapshot;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `kih auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &KihConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags, config).await,
        AuthCommands::Google => google::handle(flags, config).await,
        AuthCommands::Register(args) => register::handle(args, flags, config).await,
        AuthCommands::ForgotPassword(args) => forgot_password::handle(args, flags, config).await,
        AuthCommands::Logout => logout::handle(flags),
        AuthCommands::Status => status::handle(flags),
    }
}

/// Response printed after any successful sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedInResponse {
    signed_in: bool,
    user: UserSnapshot,
    expires_at: String,
}

impl From<&AuthSession> for SignedInResponse {
    fn from(session: &AuthSession) -> Self {
        Self {
            signed_in: true,
            user: session.user.clone(),
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

fn identity_client(config: &KihConfig) -> anyhow::Result<IdentityClient> {
    KihConfig::require("auth", config.auth.is_configured())?;
    IdentityClient::new(&config.auth).context("failed to build identity provider client")
}

/// Password from `--password`, else the first line of stdin.
fn read_password(flag: Option<&str>) -> anyhow::Result<String> {
    if flag.is_none() {
        eprint!("Password: ");
    }
    password_from(flag, std::io::stdin().lock())
}

fn password_from(flag: Option<&str>, mut reader: impl BufRead) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flag_wins_over_stdin() {
        let password = password_from(Some("rahasia"), Cursor::new("ignored\n")).unwrap();
        assert_eq!(password, "rahasia");
    }

    #[test]
    fn stdin_line_is_stripped() {
        let password = password_from(None, Cursor::new("rahasia 123\r\nnext")).unwrap();
        assert_eq!(password, "rahasia 123");
    }

    #[test]
    fn empty_stdin_is_rejected() {
        assert!(password_from(None, Cursor::new("")).is_err());
        assert!(password_from(None, Cursor::new("\n")).is_err());
    }

    #[test]
    fn unconfigured_auth_names_the_section() {
        let err = identity_client(&KihConfig::default()).unwrap_err();
        assert!(err.to_string().contains("'auth'"));
    }
}

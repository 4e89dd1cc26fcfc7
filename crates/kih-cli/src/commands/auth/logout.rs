use kih_auth::SessionHub;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

/// Handle `kih auth logout`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    kih_auth::sign_out(SessionHub::global())?;
    output(&LogoutResponse { cleared: true }, flags.format)
}

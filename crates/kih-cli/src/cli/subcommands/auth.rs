use clap::{Args, Subcommand};

/// Account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Sign in with Google in the browser.
    Google,
    /// Create an account.
    Register(AuthRegisterArgs),
    /// Send a password reset email.
    #[command(name = "forgot-password")]
    ForgotPassword(AuthForgotPasswordArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    pub email: String,
    /// Password; read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    pub email: String,
    /// Display name shown on forum posts.
    #[arg(long)]
    pub name: Option<String>,
    /// Password; read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthForgotPasswordArgs {
    pub email: String,
}

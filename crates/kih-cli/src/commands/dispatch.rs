use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Page(args) => commands::page::run(&args, ctx, flags).await,
        Commands::Courses { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Kos { action } => commands::kos::handle(&action, ctx, flags).await,
        Commands::Forum { action } => commands::forum::handle(&action, ctx, flags).await,
        Commands::Locations { action } => commands::location::handle(&action, ctx, flags).await,
        Commands::Doc { action } => commands::doc::handle(&action, ctx, flags).await,
        Commands::Schema(_) | Commands::Routes | Commands::Auth { .. } => {
            unreachable!("schema/routes/auth are pre-dispatched in main")
        }
    }
}

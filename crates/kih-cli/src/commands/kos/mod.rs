mod get;
mod list;

use kih_core::enums::Collection;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{KosCommands, PhotoCommands};
use crate::commands::shared::photo;
use crate::context::AppContext;

/// Handle `kih kos`.
pub async fn handle(
    action: &KosCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        KosCommands::List(args) => list::run(args, ctx, flags).await,
        KosCommands::Get { id } => get::run(id, ctx, flags).await,
        KosCommands::Photo {
            action: PhotoCommands::Add { id, file },
        } => photo::run(Collection::KosHomestay, id, file, ctx, flags).await,
    }
}

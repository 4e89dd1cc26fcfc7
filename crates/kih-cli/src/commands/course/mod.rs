mod get;
mod list;

use kih_core::enums::Collection;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{CourseCommands, PhotoCommands};
use crate::commands::shared::photo;
use crate::context::AppContext;

/// Handle `kih courses`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CourseCommands::List(args) => list::run(args, ctx, flags).await,
        CourseCommands::Get { id } => get::run(id, ctx, flags).await,
        CourseCommands::Photo {
            action: PhotoCommands::Add { id, file },
        } => photo::run(Collection::CourseInstitutions, id, file, ctx, flags).await,
    }
}

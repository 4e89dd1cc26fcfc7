mod delete;
mod edit;
mod like;
mod list;
mod post;
mod replies;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ForumCommands;
use crate::context::AppContext;

/// Handle `kih forum`.
pub async fn handle(
    action: &ForumCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ForumCommands::List(args) => list::run(args.mine, ctx, flags).await,
        ForumCommands::Get { id } => list::run_detail(id, ctx, flags).await,
        ForumCommands::Post(content) => post::run_post(&content.joined(), ctx, flags).await,
        ForumCommands::Edit { id, content } => edit::run(id, &content.joined(), ctx, flags).await,
        ForumCommands::Delete { id, yes } => delete::run_post(id, *yes, ctx, flags).await,
        ForumCommands::Like { id, reply } => like::run(id, *reply, ctx, flags).await,
        ForumCommands::Reply { post_id, content } => {
            post::run_reply(post_id, &content.joined(), ctx, flags).await
        }
        ForumCommands::Replies { post_id } => replies::run(post_id, ctx, flags).await,
        ForumCommands::DeleteReply { id, yes } => delete::run_reply(id, *yes, ctx, flags).await,
    }
}

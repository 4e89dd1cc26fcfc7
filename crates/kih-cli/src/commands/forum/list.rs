use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::forum;

/// `kih forum list`: the Angkringan page for the signed-in user.
pub async fn run(mine: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let page = forum::list(&ctx.service, Some(&viewer), mine, limit).await;
    ctx.track_page_view("/angkringan", "Angkringan").await;
    output(&page, flags.format)
}

/// `kih forum get`: one post with its replies.
pub async fn run_detail(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let page = forum::detail(&ctx.service, Some(&viewer), id).await;
    ctx.track_page_view(&format!("/angkringan/{id}"), "Diskusi").await;
    output(&page, flags.format)
}

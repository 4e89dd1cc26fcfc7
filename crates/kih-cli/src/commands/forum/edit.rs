use anyhow::bail;
use kih_core::forum::{is_author, normalize_content};
use kih_db::updates::PostUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::forum::PostView;

/// `kih forum edit`: replace the text of the viewer's own post.
pub async fn run(
    id: &str,
    text: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let Some(post) = ctx.service.get_post(id).await? else {
        bail!("post {id} not found");
    };
    if !is_author(Some(&viewer), &post.author_id) {
        bail!("only the author can edit this post");
    }

    let update = PostUpdateBuilder::new()
        .content(normalize_content(text)?)
        .build();
    ctx.service.update_post(id, &update).await?;
    tracing::debug!(post_id = %id, "post edited");

    let Some(updated) = ctx.service.get_post(id).await? else {
        bail!("post {id} disappeared after update");
    };
    output(&PostView::new(updated, Some(&viewer)), flags.format)
}

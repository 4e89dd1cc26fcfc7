use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LikeResponse {
    id: String,
    liked: bool,
    likes_count: u32,
}

/// `kih forum like`: toggle the viewer's like on a post or reply.
pub async fn run(
    id: &str,
    reply: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let change = if reply {
        ctx.service.toggle_reply_like(id, &viewer.uid).await?
    } else {
        ctx.service.toggle_post_like(id, &viewer.uid).await?
    };
    output(
        &LikeResponse {
            id: id.to_string(),
            liked: change.liked,
            likes_count: change.likes_count,
        },
        flags.format,
    )
}

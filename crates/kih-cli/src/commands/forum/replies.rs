use kih_core::listing::ListingView;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::forum::ReplyView;

/// `kih forum replies`: replies to a post, oldest first.
pub async fn run(post_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let listing = ListingView::from_fetch(ctx.service.list_replies(post_id).await)
        .map(|reply| ReplyView::new(reply, Some(&viewer)));
    output(&listing, flags.format)
}

use anyhow::bail;
use kih_core::forum::is_author;
use kih_db::flows::{Confirm, DeleteOutcome, PostDeletion};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::confirm::Confirmation;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    id: String,
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

impl DeleteResponse {
    fn removed(id: &str) -> Self {
        Self {
            id: id.to_string(),
            deleted: true,
            reason: None,
        }
    }

    fn kept(id: &str, reason: &'static str) -> Self {
        Self {
            id: id.to_string(),
            deleted: false,
            reason: Some(reason),
        }
    }
}

/// `kih forum delete`. A viewer who is not the author is refused quietly:
/// nothing is written and the response reports the post as kept.
pub async fn run_post(
    id: &str,
    yes: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let Some(post) = ctx.service.get_post(id).await? else {
        bail!("post {id} not found");
    };

    let deletion = PostDeletion::new(&post);
    let outcome = deletion
        .delete(&ctx.service, Some(&viewer), &Confirmation::from_flag(yes))
        .await;

    let response = match outcome {
        DeleteOutcome::Removed | DeleteOutcome::AlreadyRemoved => DeleteResponse::removed(id),
        DeleteOutcome::NotAuthorized => DeleteResponse::kept(id, "not_author"),
        DeleteOutcome::Cancelled => DeleteResponse::kept(id, "cancelled"),
        DeleteOutcome::Busy => DeleteResponse::kept(id, "busy"),
        DeleteOutcome::Failed { message } => bail!(message),
    };
    output(&response, flags.format)
}

/// `kih forum delete-reply`: author-only, confirmed like posts.
pub async fn run_reply(
    id: &str,
    yes: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let Some(reply) = ctx.service.get_reply(id).await? else {
        bail!("reply {id} not found");
    };

    if !is_author(Some(&viewer), &reply.author_id) {
        tracing::debug!(reply_id = %id, "delete refused: viewer is not the author");
        return output(&DeleteResponse::kept(id, "not_author"), flags.format);
    }

    let confirmation = Confirmation::from_flag(yes);
    let response = if confirmation.confirm("Delete this reply? This cannot be undone.") {
        ctx.service.delete_reply(id).await?;
        DeleteResponse::removed(id)
    } else {
        DeleteResponse::kept(id, "cancelled")
    };
    output(&response, flags.format)
}

use anyhow::bail;
use kih_core::identity::UserSnapshot;
use kih_db::flows::{PostComposer, SubmitOutcome};
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<String>,
    state: &'static str,
}

/// `kih forum post`.
pub async fn run_post(text: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    let id = submit(&ctx.service, &PostComposer::for_post(), &viewer, text).await?;
    output(
        &SubmitResponse {
            id,
            post_id: None,
            state: "persisted",
        },
        flags.format,
    )
}

/// `kih forum reply`.
pub async fn run_reply(
    post_id: &str,
    text: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_user()?;
    if ctx.service.get_post(post_id).await?.is_none() {
        bail!("post {post_id} not found");
    }
    let composer = PostComposer::for_reply(post_id);
    let id = submit(&ctx.service, &composer, &viewer, text).await?;
    output(
        &SubmitResponse {
            id,
            post_id: Some(post_id.to_string()),
            state: "persisted",
        },
        flags.format,
    )
}

/// Drive one composer submit and turn every non-success into an error.
async fn submit<S: DocumentStore>(
    service: &PortalService<S>,
    composer: &PostComposer,
    viewer: &UserSnapshot,
    text: &str,
) -> anyhow::Result<String> {
    composer.set_draft(text);

    let spinner = Progress::spinner("Mengirim...");
    let outcome = composer.submit(service, Some(viewer)).await;
    match outcome {
        SubmitOutcome::Submitted { id } => {
            spinner.finish_clear();
            Ok(id)
        }
        SubmitOutcome::Empty => {
            spinner.finish_clear();
            bail!("content must not be empty")
        }
        SubmitOutcome::SignedOut => {
            spinner.finish_clear();
            bail!("not signed in; run `kih auth login` first")
        }
        SubmitOutcome::Busy => {
            spinner.finish_clear();
            bail!("a submission is already in progress")
        }
        SubmitOutcome::Failed { message } => {
            spinner.finish_err("Gagal mengirim");
            bail!("{message}\ndraft kept: {}", composer.draft())
        }
    }
}

#[cfg(test)]
mod tests {
    use kih_core::forum::SubmitState;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::test_support::{service, user};

    #[tokio::test]
    async fn submit_persists_trimmed_post() {
        let service = service().await;
        let composer = PostComposer::for_post();
        let id = submit(&service, &composer, &user("u1", "Siti"), "  halo Pare  ")
            .await
            .unwrap();

        let post = service.get_post(&id).await.unwrap().unwrap();
        assert_eq!(post.content, "halo Pare");
        assert_eq!(post.author_name, "Siti");
        assert_eq!(composer.state(), SubmitState::Persisted);
        assert!(composer.draft().is_empty());
    }

    #[tokio::test]
    async fn blank_submit_is_rejected_without_write() {
        let service = service().await;
        let err = submit(&service, &PostComposer::for_post(), &user("u1", "Siti"), "   ")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(service.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reply_bumps_parent_count() {
        let service = service().await;
        let siti = user("u1", "Siti");
        let post_id = submit(&service, &PostComposer::for_post(), &siti, "Info kos?")
            .await
            .unwrap();
        submit(&service, &PostComposer::for_reply(&post_id), &siti, "Ada di Tulungrejo")
            .await
            .unwrap();

        let post = service.get_post(&post_id).await.unwrap().unwrap();
        assert_eq!(post.replies_count, 1);
    }
}

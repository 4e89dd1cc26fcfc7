//! Draft composition and submission for posts and replies.

use std::sync::Mutex;

use kih_core::forum::{NewPost, NewReply, SubmitState};
use kih_core::identity::UserSnapshot;

use crate::document::DocumentStore;
use crate::flows::lock;
use crate::service::PortalService;

/// What a composer publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeTarget {
    Post,
    Reply { post_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted under `id`; the draft was cleared.
    Submitted { id: String },
    /// A submit is already in flight; nothing was sent.
    Busy,
    /// No signed-in user; nothing was sent.
    SignedOut,
    /// Blank draft; nothing was sent.
    Empty,
    /// The store rejected the write; the draft is kept.
    Failed { message: String },
}

#[derive(Debug, Default)]
struct Inner {
    draft: String,
    state: SubmitState,
    error: Option<String>,
}

/// Holds one draft and guards it against double submission.
#[derive(Debug)]
pub struct PostComposer {
    target: ComposeTarget,
    inner: Mutex<Inner>,
}

impl PostComposer {
    #[must_use]
    pub fn new(target: ComposeTarget) -> Self {
        Self {
            target,
            inner: Mutex::new(Inner::default()),
        }
    }

    #[must_use]
    pub fn for_post() -> Self {
        Self::new(ComposeTarget::Post)
    }

    #[must_use]
    pub fn for_reply(post_id: impl Into<String>) -> Self {
        Self::new(ComposeTarget::Reply {
            post_id: post_id.into(),
        })
    }

    #[must_use]
    pub const fn target(&self) -> &ComposeTarget {
        &self.target
    }

    /// Replace the draft text. Refused (returns `false`) while submitting.
    pub fn set_draft(&self, text: impl Into<String>) -> bool {
        let mut inner = lock(&self.inner);
        if !inner.state.is_editable() {
            return false;
        }
        inner.draft = text.into();
        if inner.state.can_transition_to(SubmitState::Draft) {
            inner.state = SubmitState::Draft;
            inner.error = None;
        }
        true
    }

    #[must_use]
    pub fn draft(&self) -> String {
        lock(&self.inner).draft.clone()
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        lock(&self.inner).state
    }

    /// Message from the last failed submit, cleared on edit or retry.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        lock(&self.inner).error.clone()
    }

    /// Whether the submit control is enabled for `viewer`.
    #[must_use]
    pub fn can_submit(&self, viewer: Option<&UserSnapshot>) -> bool {
        let inner = lock(&self.inner);
        viewer.is_some() && !inner.draft.trim().is_empty() && inner.state.is_editable()
    }

    /// Publish the draft as `viewer`.
    ///
    /// At most one store write is in flight per composer: a second call while
    /// the first is pending returns [`SubmitOutcome::Busy`] immediately.
    pub async fn submit<S: DocumentStore>(
        &self,
        service: &PortalService<S>,
        viewer: Option<&UserSnapshot>,
    ) -> SubmitOutcome {
        let request = {
            let mut inner = lock(&self.inner);
            if inner.state == SubmitState::Submitting {
                tracing::debug!("submit ignored: already submitting");
                return SubmitOutcome::Busy;
            }
            let Some(author) = viewer else {
                return SubmitOutcome::SignedOut;
            };
            let request = match &self.target {
                ComposeTarget::Post => NewPost::compose(author, &inner.draft).map(Request::Post),
                ComposeTarget::Reply { post_id } => {
                    NewReply::compose(post_id, author, &inner.draft).map(Request::Reply)
                }
            };
            let Ok(request) = request else {
                return SubmitOutcome::Empty;
            };
            inner.state = SubmitState::Submitting;
            inner.error = None;
            request
        };

        tracing::debug!(target_kind = ?self.target, "submitting draft");
        let result = match request {
            Request::Post(post) => service.create_post(post).await,
            Request::Reply(reply) => service.add_reply(reply).await,
        };

        let mut inner = lock(&self.inner);
        match result {
            Ok(id) => {
                inner.draft.clear();
                inner.state = SubmitState::Persisted;
                tracing::debug!(%id, "draft persisted");
                SubmitOutcome::Submitted { id }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to publish draft");
                let message = format!("Failed to publish: {e}");
                inner.state = SubmitState::SubmissionFailed;
                inner.error = Some(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }
}

enum Request {
    Post(NewPost),
    Reply(NewReply),
}

//! Author-only post deletion with confirmation.

use std::sync::Mutex;

use kih_core::entities::ForumPost;
use kih_core::forum::{DeleteState, is_author};
use kih_core::identity::UserSnapshot;

use crate::document::DocumentStore;
use crate::flows::lock;
use crate::service::PortalService;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// Viewer is not the author. Nothing was sent and the state is unchanged.
    NotAuthorized,
    /// The user declined the confirmation.
    Cancelled,
    /// A delete is already in flight.
    Busy,
    AlreadyRemoved,
    Failed { message: String },
}

#[derive(Debug, Default)]
struct Inner {
    state: DeleteState,
    error: Option<String>,
}

/// Delete flow for one persisted post.
#[derive(Debug)]
pub struct PostDeletion {
    post_id: String,
    author_id: String,
    inner: Mutex<Inner>,
}

impl PostDeletion {
    #[must_use]
    pub fn new(post: &ForumPost) -> Self {
        Self {
            post_id: post.id.clone(),
            author_id: post.author_id.clone(),
            inner: Mutex::new(Inner::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> DeleteState {
        lock(&self.inner).state
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        lock(&self.inner).error.clone()
    }

    /// Whether the delete control is shown to `viewer`.
    #[must_use]
    pub fn is_offered_to(&self, viewer: Option<&UserSnapshot>) -> bool {
        is_author(viewer, &self.author_id) && self.state() != DeleteState::Removed
    }

    pub async fn delete<S: DocumentStore>(
        &self,
        service: &PortalService<S>,
        viewer: Option<&UserSnapshot>,
        confirm: &impl Confirm,
    ) -> DeleteOutcome {
        if !is_author(viewer, &self.author_id) {
            tracing::debug!(post_id = %self.post_id, "delete refused: viewer is not the author");
            return DeleteOutcome::NotAuthorized;
        }
        match self.state() {
            DeleteState::Deleting => return DeleteOutcome::Busy,
            DeleteState::Removed => return DeleteOutcome::AlreadyRemoved,
            DeleteState::Persisted | DeleteState::DeleteFailed => {}
        }
        if !confirm.confirm("Delete this post? This cannot be undone.") {
            return DeleteOutcome::Cancelled;
        }

        {
            let mut inner = lock(&self.inner);
            if !inner.state.can_transition_to(DeleteState::Deleting) {
                return DeleteOutcome::Busy;
            }
            inner.state = DeleteState::Deleting;
            inner.error = None;
        }

        let result = service.delete_post(&self.post_id).await;
        let mut inner = lock(&self.inner);
        match result {
            Ok(()) => {
                inner.state = DeleteState::Removed;
                DeleteOutcome::Removed
            }
            Err(e) => {
                tracing::error!(post_id = %self.post_id, error = %e, "failed to delete post");
                let message = format!("Failed to delete post: {e}");
                inner.state = DeleteState::DeleteFailed;
                inner.error = Some(message.clone());
                DeleteOutcome::Failed { message }
            }
        }
    }
}

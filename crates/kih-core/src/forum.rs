//! Forum rules: submit/delete state machines, authorship checks, post
//! composition, and like toggling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{ForumPost, Reply};
use crate::errors::CoreError;
use crate::identity::UserSnapshot;

// ---------------------------------------------------------------------------
// SubmitState
// ---------------------------------------------------------------------------

/// Lifecycle of a post or reply draft.
///
/// ```text
/// draft → submitting → persisted → draft
///                    → submission_failed → submitting (retry)
///                                        → draft (edit)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    #[default]
    Draft,
    Submitting,
    Persisted,
    SubmissionFailed,
}

impl SubmitState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Submitting],
            Self::Submitting => &[Self::Persisted, Self::SubmissionFailed],
            Self::Persisted => &[Self::Draft],
            Self::SubmissionFailed => &[Self::Submitting, Self::Draft],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// The draft text is locked while a submit is in flight.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Submitting)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitting => "submitting",
            Self::Persisted => "persisted",
            Self::SubmissionFailed => "submission_failed",
        }
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeleteState
// ---------------------------------------------------------------------------

/// Lifecycle of deleting a persisted post.
///
/// ```text
/// persisted → deleting → removed
///                      → delete_failed → deleting (retry)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    #[default]
    Persisted,
    Deleting,
    Removed,
    DeleteFailed,
}

impl DeleteState {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Persisted => &[Self::Deleting],
            Self::Deleting => &[Self::Removed, Self::DeleteFailed],
            Self::DeleteFailed => &[Self::Deleting],
            Self::Removed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::Deleting => "deleting",
            Self::Removed => "removed",
            Self::DeleteFailed => "delete_failed",
        }
    }
}

impl fmt::Display for DeleteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Only the author may delete or edit a post or reply.
#[must_use]
pub fn is_author(viewer: Option<&UserSnapshot>, author_id: &str) -> bool {
    viewer.is_some_and(|user| !author_id.is_empty() && user.uid == author_id)
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Trim a draft, rejecting blank content.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when nothing but whitespace remains.
pub fn normalize_content(draft: &str) -> Result<String, CoreError> {
    let content = draft.trim();
    if content.is_empty() {
        return Err(CoreError::Validation("content must not be empty".into()));
    }
    Ok(content.to_string())
}

/// A validated post ready to be written. Counters start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: String,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
}

impl NewPost {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for blank drafts.
    pub fn compose(author: &UserSnapshot, draft: &str) -> Result<Self, CoreError> {
        Ok(Self {
            author_id: author.uid.clone(),
            author_name: author.author_name().to_string(),
            author_photo_url: author.photo_url.clone(),
            content: normalize_content(draft)?,
        })
    }
}

impl From<NewPost> for ForumPost {
    fn from(post: NewPost) -> Self {
        Self {
            author_id: post.author_id,
            author_name: post.author_name,
            author_photo_url: post.author_photo_url,
            content: post.content,
            ..Self::default()
        }
    }
}

/// A validated reply to `post_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub post_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
}

impl NewReply {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for blank drafts or an empty post id.
    pub fn compose(post_id: &str, author: &UserSnapshot, draft: &str) -> Result<Self, CoreError> {
        if post_id.trim().is_empty() {
            return Err(CoreError::Validation("reply needs a post id".into()));
        }
        Ok(Self {
            post_id: post_id.to_string(),
            author_id: author.uid.clone(),
            author_name: author.author_name().to_string(),
            content: normalize_content(draft)?,
        })
    }
}

impl From<NewReply> for Reply {
    fn from(reply: NewReply) -> Self {
        Self {
            post_id: reply.post_id,
            author_id: reply.author_id,
            author_name: reply.author_name,
            content: reply.content,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// Result of toggling a like; `likes_count` always equals `liked_by.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeChange {
    pub liked_by: Vec<String>,
    pub likes_count: u32,
    /// Whether the viewer likes the item after the toggle.
    pub liked: bool,
}

#[must_use]
pub fn toggle_like(liked_by: &[String], uid: &str) -> LikeChange {
    let already = liked_by.iter().any(|id| id == uid);
    let liked_by: Vec<String> = if already {
        liked_by.iter().filter(|id| *id != uid).cloned().collect()
    } else {
        liked_by
            .iter()
            .cloned()
            .chain(std::iter::once(uid.to_string()))
            .collect()
    };
    LikeChange {
        likes_count: u32::try_from(liked_by.len()).unwrap_or(u32::MAX),
        liked_by,
        liked: !already,
    }
}

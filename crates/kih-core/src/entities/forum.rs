use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::enums::Collection;

/// A top-level Angkringan post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    #[serde(default)]
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_photo_url: Option<String>,
    pub content: String,
    /// Server-assigned creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replies_count: u32,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ForumPost {
    /// Whether `uid` is among the users who liked this post.
    #[must_use]
    pub fn is_liked_by(&self, uid: &str) -> bool {
        self.liked_by.iter().any(|id| id == uid)
    }
}

impl Document for ForumPost {
    const COLLECTION: Collection = Collection::ForumPosts;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A reply to a [`ForumPost`], linked by `post_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for Reply {
    const COLLECTION: Collection = Collection::Replies;

    fn id(&self) -> &str {
        &self.id
    }
}

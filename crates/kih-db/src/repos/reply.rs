//! Replies to forum posts.

use kih_core::entities::{ForumPost, Reply};
use kih_core::forum::{LikeChange, NewReply, toggle_like};

use crate::document::{Direction, DocumentStore, Query};
use crate::error::DatabaseError;
use crate::repos::forum::like_patch;
use crate::service::{PortalService, field_patch};

fn with_server_time(mut reply: Reply) -> Reply {
    if reply.timestamp.is_none() {
        reply.timestamp = reply.created_at;
    }
    reply
}

impl<S: DocumentStore> PortalService<S> {
    /// Replies to `post_id`, oldest first.
    pub async fn list_replies(&self, post_id: &str) -> Result<Vec<Reply>, DatabaseError> {
        let replies: Vec<Reply> = self
            .fetch_all(
                &Query::new()
                    .where_eq("postId", post_id)
                    .order_by("createdAt", Direction::Asc),
            )
            .await?;
        Ok(replies.into_iter().map(with_server_time).collect())
    }

    /// Persist a reply and bump the parent's `repliesCount`.
    ///
    /// The parent must exist. The two writes are independent; a failed count
    /// update leaves the reply in place.
    pub async fn add_reply(&self, reply: NewReply) -> Result<String, DatabaseError> {
        let post: ForumPost = self.fetch_required(&reply.post_id).await?;
        let id = self.insert(&Reply::from(reply)).await?;
        self.patch::<ForumPost>(
            &post.id,
            field_patch("repliesCount", post.replies_count.saturating_add(1)),
        )
        .await?;
        Ok(id)
    }

    /// Remove a reply and decrement the parent's count (never below zero).
    /// Unknown ids succeed without touching any post.
    pub async fn delete_reply(&self, id: &str) -> Result<(), DatabaseError> {
        let Some(reply) = self.fetch::<Reply>(id).await? else {
            return Ok(());
        };
        self.remove::<Reply>(id).await?;
        if let Some(post) = self.fetch::<ForumPost>(&reply.post_id).await? {
            self.patch::<ForumPost>(
                &post.id,
                field_patch("repliesCount", post.replies_count.saturating_sub(1)),
            )
            .await?;
        }
        Ok(())
    }

    pub async fn get_reply(&self, id: &str) -> Result<Option<Reply>, DatabaseError> {
        Ok(self.fetch::<Reply>(id).await?.map(with_server_time))
    }

    pub async fn toggle_reply_like(
        &self,
        id: &str,
        uid: &str,
    ) -> Result<LikeChange, DatabaseError> {
        let reply: Reply = self.fetch_required(id).await?;
        let change = toggle_like(&reply.liked_by, uid);
        self.patch::<Reply>(id, like_patch(&change)).await?;
        Ok(change)
    }
}

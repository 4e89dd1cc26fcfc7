//! Forum post repository.

use serde_json::{Map, Value};

use kih_core::entities::ForumPost;
use kih_core::forum::{LikeChange, NewPost, toggle_like};

use crate::document::{Direction, DocumentStore, Query};
use crate::error::DatabaseError;
use crate::helpers::to_body;
use crate::repos::string_array;
use crate::service::PortalService;
use crate::updates::post::PostUpdate;

/// `timestamp` is the store-assigned creation time.
fn with_server_time(mut post: ForumPost) -> ForumPost {
    if post.timestamp.is_none() {
        post.timestamp = post.created_at;
    }
    post
}

pub(crate) fn like_patch(change: &LikeChange) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("likedBy".into(), string_array(&change.liked_by));
    patch.insert("likesCount".into(), Value::from(change.likes_count));
    patch
}

impl<S: DocumentStore> PortalService<S> {
    /// Posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<ForumPost>, DatabaseError> {
        let posts: Vec<ForumPost> = self
            .fetch_all(&Query::new().order_by("createdAt", Direction::Desc))
            .await?;
        Ok(posts.into_iter().map(with_server_time).collect())
    }

    pub async fn list_posts_by_author(
        &self,
        author_id: &str,
    ) -> Result<Vec<ForumPost>, DatabaseError> {
        let posts: Vec<ForumPost> = self
            .fetch_all(
                &Query::new()
                    .where_eq("authorId", author_id)
                    .order_by("createdAt", Direction::Desc),
            )
            .await?;
        Ok(posts.into_iter().map(with_server_time).collect())
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<ForumPost>, DatabaseError> {
        Ok(self.fetch::<ForumPost>(id).await?.map(with_server_time))
    }

    /// Persist a composed post with zeroed counters.
    pub async fn create_post(&self, post: NewPost) -> Result<String, DatabaseError> {
        let post = ForumPost::from(post);
        self.insert(&post).await
    }

    pub async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<(), DatabaseError> {
        self.patch::<ForumPost>(id, to_body(update)?).await
    }

    /// Remove a post. Its replies are left in place.
    pub async fn delete_post(&self, id: &str) -> Result<(), DatabaseError> {
        self.remove::<ForumPost>(id).await
    }

    /// Like or unlike a post as `uid`. Read-modify-write, last write wins.
    pub async fn toggle_post_like(&self, id: &str, uid: &str) -> Result<LikeChange, DatabaseError> {
        let post: ForumPost = self.fetch_required(id).await?;
        let change = toggle_like(&post.liked_by, uid);
        self.patch::<ForumPost>(id, like_patch(&change)).await?;
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_service;
    use crate::updates::post::PostUpdateBuilder;
    use kih_core::forum::NewPost;
    use kih_core::identity::UserSnapshot;
    use pretty_assertions::assert_eq;

    fn budi() -> UserSnapshot {
        UserSnapshot {
            uid: "uid-budi".into(),
            email: Some("budi@example.com".into()),
            display_name: Some("Budi".into()),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn created_post_has_server_timestamp_and_zero_counters() {
        let svc = test_service().await;
        let id = svc
            .create_post(NewPost::compose(&budi(), "Info les TOEFL?").unwrap())
            .await
            .unwrap();

        let post = svc.get_post(&id).await.unwrap().unwrap();
        assert_eq!(post.content, "Info les TOEFL?");
        assert_eq!(post.author_name, "Budi");
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.replies_count, 0);
        assert!(post.timestamp.is_some());
        assert_eq!(post.timestamp, post.created_at);
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let svc = test_service().await;
        for text in ["pertama", "kedua", "ketiga"] {
            svc.create_post(NewPost::compose(&budi(), text).unwrap())
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(3)).await;
        }
        let contents: Vec<String> = svc
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(contents, vec!["ketiga", "kedua", "pertama"]);
        assert_eq!(svc.list_posts_by_author("uid-budi").await.unwrap().len(), 3);
        assert!(svc.list_posts_by_author("uid-siti").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn like_toggle_roundtrip() {
        let svc = test_service().await;
        let id = svc
            .create_post(NewPost::compose(&budi(), "halo").unwrap())
            .await
            .unwrap();

        let liked = svc.toggle_post_like(&id, "uid-siti").await.unwrap();
        assert!(liked.liked);
        let post = svc.get_post(&id).await.unwrap().unwrap();
        assert_eq!(post.likes_count, 1);
        assert!(post.is_liked_by("uid-siti"));

        let unliked = svc.toggle_post_like(&id, "uid-siti").await.unwrap();
        assert!(!unliked.liked);
        let post = svc.get_post(&id).await.unwrap().unwrap();
        assert_eq!(post.likes_count, 0);
        assert!(post.liked_by.is_empty());
    }

    #[tokio::test]
    async fn edit_content() {
        let svc = test_service().await;
        let id = svc
            .create_post(NewPost::compose(&budi(), "typo").unwrap())
            .await
            .unwrap();
        svc.update_post(&id, &PostUpdateBuilder::new().content("fixed").build())
            .await
            .unwrap();
        assert_eq!(svc.get_post(&id).await.unwrap().unwrap().content, "fixed");
    }
}

use kih_core::entities::{ForumPost, Reply};
use kih_core::forum::is_author;
use kih_core::identity::UserSnapshot;
use kih_core::listing::ListingView;
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use super::DetailView;

/// A post as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: ForumPost,
    pub liked_by_viewer: bool,
    pub can_delete: bool,
}

impl PostView {
    pub fn new(post: ForumPost, viewer: Option<&UserSnapshot>) -> Self {
        Self {
            liked_by_viewer: viewer.is_some_and(|user| post.is_liked_by(&user.uid)),
            can_delete: is_author(viewer, &post.author_id),
            post,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    #[serde(flatten)]
    pub reply: Reply,
    pub liked_by_viewer: bool,
    pub can_delete: bool,
}

impl ReplyView {
    pub fn new(reply: Reply, viewer: Option<&UserSnapshot>) -> Self {
        Self {
            liked_by_viewer: viewer.is_some_and(|user| reply.liked_by.contains(&user.uid)),
            can_delete: is_author(viewer, &reply.author_id),
            reply,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Composer {
    pub placeholder: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ForumListPage {
    pub heading: &'static str,
    pub composer: Composer,
    pub listing: ListingView<PostView>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailPage {
    pub post: DetailView<PostView>,
    pub replies: ListingView<ReplyView>,
    pub composer: Composer,
}

/// Newest posts first; `mine` keeps only the viewer's own posts.
pub async fn list<S: DocumentStore>(
    service: &PortalService<S>,
    viewer: Option<&UserSnapshot>,
    mine: bool,
    limit: usize,
) -> ForumListPage {
    let fetched = match (mine, viewer) {
        (true, Some(user)) => service.list_posts_by_author(&user.uid).await,
        _ => service.list_posts().await,
    };
    let listing = match fetched {
        Ok(posts) => {
            let total = posts.len();
            ListingView::from_page(
                posts
                    .into_iter()
                    .take(limit)
                    .map(|post| PostView::new(post, viewer))
                    .collect(),
                total,
            )
        }
        Err(err) => ListingView::Failed {
            message: format!("Gagal memuat postingan: {err}"),
        },
    };

    ForumListPage {
        heading: "Angkringan Diskusi",
        composer: Composer {
            placeholder: "Apa yang ada di pikiranmu?",
            enabled: viewer.is_some(),
        },
        listing,
    }
}

/// One post with its replies, oldest reply first.
pub async fn detail<S: DocumentStore>(
    service: &PortalService<S>,
    viewer: Option<&UserSnapshot>,
    id: &str,
) -> PostDetailPage {
    let post = DetailView::from_fetch(
        service.get_post(id).await,
        "Postingan tidak ditemukan.",
        "Gagal memuat postingan",
    );

    let replies = if post.item().is_some() {
        match service.list_replies(id).await {
            Ok(replies) => ListingView::from_items(
                replies
                    .into_iter()
                    .map(|reply| ReplyView::new(reply, viewer))
                    .collect(),
            ),
            Err(err) => ListingView::Failed {
                message: format!("Gagal memuat komentar: {err}"),
            },
        }
    } else {
        ListingView::NoResults
    };

    PostDetailPage {
        composer: Composer {
            placeholder: "Tulis komentar...",
            enabled: viewer.is_some() && post.item().is_some(),
        },
        post: post.map(|post| PostView::new(post, viewer)),
        replies,
    }
}

#[cfg(test)]
mod tests {
    use kih_core::forum::{NewPost, NewReply};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::test_support::{service, user};

    #[tokio::test]
    async fn list_marks_viewer_flags() {
        let service = service().await;
        let siti = user("uid-siti", "Siti");
        let budi = user("uid-budi", "Budi");
        let id = service
            .create_post(NewPost::compose(&siti, "Ada info kos murah?").unwrap())
            .await
            .unwrap();
        service.toggle_post_like(&id, &budi.uid).await.unwrap();

        let as_budi = list(&service, Some(&budi), false, 20).await;
        let post = &as_budi.listing.items()[0];
        assert!(post.liked_by_viewer);
        assert!(!post.can_delete);

        let as_siti = list(&service, Some(&siti), false, 20).await;
        let post = &as_siti.listing.items()[0];
        assert!(!post.liked_by_viewer);
        assert!(post.can_delete);
    }

    #[tokio::test]
    async fn mine_keeps_own_posts() {
        let service = service().await;
        let siti = user("uid-siti", "Siti");
        let budi = user("uid-budi", "Budi");
        service
            .create_post(NewPost::compose(&siti, "halo").unwrap())
            .await
            .unwrap();
        service
            .create_post(NewPost::compose(&budi, "hai").unwrap())
            .await
            .unwrap();

        let page = list(&service, Some(&budi), true, 20).await;
        let authors: Vec<_> = page
            .listing
            .items()
            .iter()
            .map(|p| p.post.author_name.as_str())
            .collect();
        assert_eq!(authors, vec!["Budi"]);
    }

    #[tokio::test]
    async fn detail_lists_replies_in_order() {
        let service = service().await;
        let siti = user("uid-siti", "Siti");
        let id = service
            .create_post(NewPost::compose(&siti, "Rekomendasi kursus TOEFL?").unwrap())
            .await
            .unwrap();
        for text in ["Coba Elfast", "Mahesa juga bagus"] {
            service
                .add_reply(NewReply::compose(&id, &siti, text).unwrap())
                .await
                .unwrap();
        }

        let page = detail(&service, Some(&siti), &id).await;
        let contents: Vec<_> = page
            .replies
            .items()
            .iter()
            .map(|r| r.reply.content.as_str())
            .collect();
        assert_eq!(contents, vec!["Coba Elfast", "Mahesa juga bagus"]);
        assert_eq!(page.post.item().unwrap().post.replies_count, 2);
        assert!(page.composer.enabled);
    }

    #[tokio::test]
    async fn missing_post_disables_composer() {
        let service = service().await;
        let page = detail(&service, Some(&user("u", "U")), "nope").await;
        assert!(matches!(page.post, DetailView::NotFound { .. }));
        assert_eq!(page.replies, ListingView::NoResults);
        assert!(!page.composer.enabled);
    }
}

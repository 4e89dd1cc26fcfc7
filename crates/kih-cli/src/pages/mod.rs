//! Page models.
//!
//! A page is plain data computed from the store and the viewer's auth state;
//! the shell and the output layer decide how it is shown.

pub mod auth;
pub mod courses;
pub mod forum;
pub mod kos;
pub mod locations;

use std::fmt::Display;

use kih_auth::AuthState;
use kih_core::listing::ListingView;
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use crate::routes::{HOME_PATH, LOGIN_PATH, Page, Resolved, Route};

pub const LOADING_MESSAGE: &str = "Memuat...";

#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageBody {
    Loading { message: &'static str },
    Redirect { to: String },
    AuthForm(auth::AuthForm),
    CourseList(courses::CourseListPage),
    CourseDetail(courses::CourseDetailPage),
    KosList(kos::KosListPage),
    KosDetail(kos::KosDetailPage),
    ForumList(forum::ForumListPage),
    PostDetail(forum::PostDetailPage),
    Locations(locations::LocationsPage),
}

/// Single-record lookup result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView<T> {
    Found { item: T },
    NotFound { message: String },
    Failed { message: String },
}

impl<T> DetailView<T> {
    pub fn from_fetch<E: Display>(
        result: Result<Option<T>, E>,
        missing: &str,
        failed: &str,
    ) -> Self {
        match result {
            Ok(Some(item)) => Self::Found { item },
            Ok(None) => Self::NotFound {
                message: missing.to_string(),
            },
            Err(err) => Self::Failed {
                message: format!("{failed}: {err}"),
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailView<U> {
        match self {
            Self::Found { item } => DetailView::Found { item: f(item) },
            Self::NotFound { message } => DetailView::NotFound { message },
            Self::Failed { message } => DetailView::Failed { message },
        }
    }

    pub const fn item(&self) -> Option<&T> {
        match self {
            Self::Found { item } => Some(item),
            Self::NotFound { .. } | Self::Failed { .. } => None,
        }
    }
}

/// Where the landing page sends the viewer; `None` while auth is resolving.
pub fn landing_target(auth: &AuthState) -> Option<&'static str> {
    match auth {
        AuthState::Resolving => None,
        AuthState::SignedIn(_) => Some(HOME_PATH),
        AuthState::SignedOut => Some(LOGIN_PATH),
    }
}

/// The page shown instead of `route` when the viewer may not see it yet.
pub fn gate(route: &Route, auth: &AuthState) -> Option<PageBody> {
    if !route.requires_auth {
        return None;
    }
    match auth {
        AuthState::SignedIn(_) => None,
        AuthState::Resolving => Some(PageBody::Loading {
            message: LOADING_MESSAGE,
        }),
        AuthState::SignedOut => Some(PageBody::Redirect {
            to: LOGIN_PATH.to_string(),
        }),
    }
}

/// Build the body for a resolved route.
pub async fn render<S: DocumentStore>(
    resolved: &Resolved,
    auth: &AuthState,
    service: &PortalService<S>,
    limit: usize,
) -> PageBody {
    if let Some(gated) = gate(resolved.route, auth) {
        return gated;
    }

    let id = resolved.id.as_deref().unwrap_or_default();
    match resolved.route.page {
        Page::Landing => landing_target(auth).map_or(
            PageBody::Loading {
                message: LOADING_MESSAGE,
            },
            |to| PageBody::Redirect { to: to.to_string() },
        ),
        Page::Login => PageBody::AuthForm(auth::login_form()),
        Page::Register => PageBody::AuthForm(auth::register_form()),
        Page::ForgotPassword => PageBody::AuthForm(auth::forgot_password_form()),
        Page::Courses => {
            let criteria = kih_core::filter::CourseCriteria::from_pairs(resolved.query_pairs());
            PageBody::CourseList(courses::list(service, &criteria, limit).await)
        }
        Page::CourseDetail => PageBody::CourseDetail(courses::detail(service, id).await),
        Page::Kos => {
            let criteria = kih_core::filter::KosCriteria::from_pairs(resolved.query_pairs());
            PageBody::KosList(kos::list(service, &criteria, limit).await)
        }
        Page::KosDetail => PageBody::KosDetail(kos::detail(service, id).await),
        Page::Forum => {
            let mine = resolved
                .query_pairs()
                .any(|(key, value)| key == "mine" && value != "false");
            PageBody::ForumList(forum::list(service, auth.user(), mine, limit).await)
        }
        Page::PostDetail => PageBody::PostDetail(forum::detail(service, auth.user(), id).await),
        Page::Locations => {
            let criteria = kih_core::filter::LocationCriteria::from_pairs(resolved.query_pairs());
            PageBody::Locations(locations::page(service, &criteria, limit).await)
        }
    }
}

/// The first `limit` of `matched`, with the state and total taken from
/// every match.
pub fn listing_page<T: Clone>(matched: Vec<&T>, limit: usize) -> ListingView<T> {
    let total = matched.len();
    ListingView::from_page(matched.into_iter().take(limit).cloned().collect(), total)
}

#[cfg(test)]
pub(crate) mod test_support {
    use kih_core::identity::UserSnapshot;
    use kih_db::PortalService;

    pub async fn service() -> PortalService {
        PortalService::new_local(":memory:").await.unwrap()
    }

    pub fn user(uid: &str, name: &str) -> UserSnapshot {
        UserSnapshot {
            uid: uid.into(),
            email: Some(format!("{uid}@example.com")),
            display_name: Some(name.into()),
            photo_url: None,
        }
    }
}

use anyhow::bail;
use kih_auth::AuthState;
use kih_db::{DocumentStore, PortalService};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::{self, PageBody};
use crate::progress::Progress;
use crate::routes::{self, ROUTES};
use crate::shell::{self, RenderedPage};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 3;

/// Handle `kih page`.
pub async fn run(args: &PageArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let auth = ctx.hub.snapshot();
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let spinner = Progress::spinner(&format!("Memuat {}...", args.path));
    let page = navigate(&args.path, &auth, &ctx.service, limit, &spinner).await;
    spinner.finish_clear();
    let page = page?;

    ctx.track_page_view(&page.path, &page.title).await;
    output(&page, flags.format)
}

/// Handle `kih routes`.
pub fn list_routes(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ROUTES, flags.format)
}

/// Render `path`, following redirects. The final page remembers the path
/// that was first asked for.
async fn navigate<S: DocumentStore>(
    path: &str,
    auth: &AuthState,
    service: &PortalService<S>,
    limit: usize,
    progress: &Progress,
) -> anyhow::Result<RenderedPage> {
    let mut current = path.to_string();
    for hops in 0..=MAX_REDIRECTS {
        let Some(resolved) = routes::resolve(&current) else {
            bail!("no page at '{current}' (see `kih routes`)");
        };
        let body = pages::render(&resolved, auth, service, limit).await;
        match body {
            PageBody::Redirect { to } => {
                tracing::debug!(from = %resolved.path, %to, "following redirect");
                progress.set_message(&format!("Memuat {to}..."));
                current = to;
            }
            body => {
                let mut page = shell::frame(&resolved, auth, body);
                if hops > 0 {
                    page.redirected_from = Some(path.to_string());
                }
                return Ok(page);
            }
        }
    }
    bail!("too many redirects starting at '{path}'")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::test_support::{service, user};

    fn quiet() -> Progress {
        Progress::spinner("")
    }

    #[tokio::test]
    async fn landing_redirects_to_courses_when_signed_in() {
        let service = service().await;
        let auth = AuthState::SignedIn(user("u1", "Siti"));
        let page = navigate("/", &auth, &service, 10, &quiet())
            .await
            .unwrap();
        assert_eq!(page.path, "/courses");
        assert_eq!(page.redirected_from.as_deref(), Some("/"));
        assert!(matches!(page.body, PageBody::CourseList(_)));
    }

    #[tokio::test]
    async fn signed_out_forum_lands_on_bare_login() {
        let service = service().await;
        let page = navigate("/angkringan", &AuthState::SignedOut, &service, 10, &quiet())
            .await
            .unwrap();
        assert_eq!(page.path, "/auth/login");
        assert!(page.shell.is_none());
        assert_eq!(page.redirected_from.as_deref(), Some("/angkringan"));
    }

    #[tokio::test]
    async fn resolving_landing_shows_loading_without_redirect() {
        let service = service().await;
        let page = navigate("/", &AuthState::Resolving, &service, 10, &quiet())
            .await
            .unwrap();
        assert!(matches!(page.body, PageBody::Loading { .. }));
        assert_eq!(page.redirected_from, None);
    }

    #[tokio::test]
    async fn direct_page_has_no_redirect_marker() {
        let service = service().await;
        let page = navigate("/kos-homestay?type=kos", &AuthState::SignedOut, &service, 10, &quiet())
            .await
            .unwrap();
        assert_eq!(page.path, "/kos-homestay");
        assert_eq!(page.redirected_from, None);
        assert!(page.shell.is_some());
    }

    #[tokio::test]
    async fn unknown_path_is_an_error() {
        let service = service().await;
        let err = navigate("/admin", &AuthState::SignedOut, &service, 10, &quiet())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no page at '/admin'"));
    }
}

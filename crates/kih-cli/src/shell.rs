//! Site chrome applied to framed routes.

use kih_auth::AuthState;
use serde::Serialize;

use crate::pages::PageBody;
use crate::routes::{self, Frame, Resolved, SITE_NAME};

const SITE_DESCRIPTION: &str =
    "Pusat informasi, komunitas, dan pembelajaran online untuk Pare, Kediri.";

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct Chrome {
    pub site: &'static str,
    pub description: &'static str,
    pub nav: Vec<NavItem>,
    pub auth: AuthState,
}

/// A page as delivered to the output layer.
#[derive(Debug, Serialize)]
pub struct RenderedPage {
    pub path: String,
    pub title: String,
    pub frame: Frame,
    /// Present only on [`Frame::Shell`] routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<Chrome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
    #[serde(flatten)]
    pub body: PageBody,
}

/// Wrap `body` according to the route's frame.
pub fn frame(resolved: &Resolved, auth: &AuthState, body: PageBody) -> RenderedPage {
    let route = resolved.route;
    let shell = match route.frame {
        Frame::Shell => Some(Chrome {
            site: SITE_NAME,
            description: SITE_DESCRIPTION,
            nav: nav_for(&resolved.path),
            auth: auth.clone(),
        }),
        Frame::Bare => None,
    };
    RenderedPage {
        path: resolved.path.clone(),
        title: route.title.to_string(),
        frame: route.frame,
        shell,
        redirected_from: None,
        body,
    }
}

fn nav_for(path: &str) -> Vec<NavItem> {
    routes::nav()
        .map(|route| NavItem {
            path: route.pattern,
            title: route.title,
            active: path == route.pattern
                || path
                    .strip_prefix(route.pattern)
                    .is_some_and(|rest| rest.starts_with('/')),
        })
        .collect()
}

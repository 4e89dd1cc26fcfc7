//! The portal's route table.
//!
//! Each route declares its own frame, so whether a page is wrapped in the
//! site shell is data, not a path check scattered through the renderer.

use serde::Serialize;

/// Whether a page is wrapped in the site shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Navigation, title, and auth state around the content.
    Shell,
    /// The page alone.
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Landing,
    Login,
    Register,
    ForgotPassword,
    Courses,
    CourseDetail,
    Kos,
    KosDetail,
    Forum,
    PostDetail,
    Locations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Path pattern; `{id}` matches one non-empty segment.
    pub pattern: &'static str,
    pub page: Page,
    pub title: &'static str,
    pub frame: Frame,
    /// Signed-out viewers are sent to the login page.
    pub requires_auth: bool,
    pub in_nav: bool,
}

const fn route(
    pattern: &'static str,
    page: Page,
    title: &'static str,
    frame: Frame,
    requires_auth: bool,
    in_nav: bool,
) -> Route {
    Route {
        pattern,
        page,
        title,
        frame,
        requires_auth,
        in_nav,
    }
}

pub const SITE_NAME: &str = "Kampung Inggris Digital Hub";
pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/courses";

pub const ROUTES: &[Route] = &[
    route("/", Page::Landing, SITE_NAME, Frame::Shell, false, false),
    route(LOGIN_PATH, Page::Login, "Masuk", Frame::Bare, false, false),
    route("/auth/register", Page::Register, "Daftar", Frame::Bare, false, false),
    route(
        "/auth/forgot-password",
        Page::ForgotPassword,
        "Lupa Password",
        Frame::Bare,
        false,
        false,
    ),
    route(HOME_PATH, Page::Courses, "Kursus", Frame::Shell, false, true),
    route("/courses/{id}", Page::CourseDetail, "Detail Kursus", Frame::Shell, false, false),
    route("/kos-homestay", Page::Kos, "Kos & Homestay", Frame::Shell, false, true),
    route("/kos-homestay/{id}", Page::KosDetail, "Detail Kos", Frame::Shell, false, false),
    route("/angkringan", Page::Forum, "Angkringan", Frame::Shell, true, true),
    route("/angkringan/{id}", Page::PostDetail, "Diskusi", Frame::Shell, true, false),
    route("/locations", Page::Locations, "Lokasi Penting", Frame::Shell, false, true),
];

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub route: &'static Route,
    pub path: String,
    /// Decoded `{id}` segment.
    pub id: Option<String>,
    /// Decoded query pairs, in order.
    pub query: Vec<(String, String)>,
}

impl Resolved {
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Match `path_and_query` (e.g. `/kos-homestay?type=kos`) to a route.
pub fn resolve(path_and_query: &str) -> Option<Resolved> {
    let (raw_path, raw_query) = path_and_query
        .split_once('?')
        .unwrap_or((path_and_query, ""));
    let path = normalize_path(raw_path);

    ROUTES.iter().find_map(|route| {
        match_pattern(route.pattern, &path).map(|id| Resolved {
            route,
            path: path.clone(),
            id,
            query: parse_query(raw_query),
        })
    })
}

/// Routes shown in the shell navigation, in table order.
pub fn nav() -> impl Iterator<Item = &'static Route> {
    ROUTES.iter().filter(|route| route.in_nav)
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::from("/")
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// `Some(None)` for a static match, `Some(Some(id))` for a `{id}` match.
#[allow(clippy::option_option)]
fn match_pattern(pattern: &str, path: &str) -> Option<Option<String>> {
    let mut id = None;
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(id),
            (Some("{id}"), Some(segment)) if !segment.is_empty() => {
                id = Some(decode(segment));
            }
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return None,
        }
    }
}

fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), |decoded| decoded.into_owned())
}

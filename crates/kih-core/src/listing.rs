//! What a listing page shows: loading, a page-level failure, an explicit
//! "no results" message, or the records.

use serde::Serialize;
use std::fmt::Display;

/// Render state of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingView<T> {
    Loading,
    /// The fetch failed; replaces the list entirely.
    Failed { message: String },
    /// Fetch succeeded but nothing survived filtering.
    NoResults,
    /// `items` may be a prefix of the matches; `total` counts all of them.
    Results { items: Vec<T>, total: usize },
}

impl<T> ListingView<T> {
    /// An empty list is [`ListingView::NoResults`], never an empty `Results`.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len();
        Self::from_page(items, total)
    }

    /// A shown page of `total` matches. The state follows `total`, so a
    /// page cut to zero rows still reports that records matched.
    #[must_use]
    pub fn from_page(items: Vec<T>, total: usize) -> Self {
        if total == 0 {
            Self::NoResults
        } else {
            Self::Results { items, total }
        }
    }

    pub fn from_fetch<E: Display>(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) => Self::from_items(items),
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Results { items, .. } => items,
            _ => &[],
        }
    }

    /// Records that matched, including any not shown.
    #[must_use]
    pub const fn total(&self) -> usize {
        match self {
            Self::Results { total, .. } => *total,
            _ => 0,
        }
    }

    /// Human-readable status line for non-result states.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some("Loading..."),
            Self::Failed { message } => Some(message),
            Self::NoResults => Some("No results match the current filters."),
            Self::Results { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListingView<U> {
        match self {
            Self::Loading => ListingView::Loading,
            Self::Failed { message } => ListingView::Failed { message },
            Self::NoResults => ListingView::NoResults,
            Self::Results { items, total } => ListingView::Results {
                items: items.into_iter().map(f).collect(),
                total,
            },
        }
    }
}

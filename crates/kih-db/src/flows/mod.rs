//! Forum submit and delete flows.
//!
//! Both flows hold their state behind a `std::sync::Mutex` that is never
//! held across an `.await`; the state is flipped before the store call so a
//! concurrent second request sees it and backs off without touching the store.

pub mod compose;
pub mod delete;

pub use compose::{ComposeTarget, PostComposer, SubmitOutcome};
pub use delete::{Confirm, DeleteOutcome, PostDeletion};

use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//! Partial-update builders.
//!
//! Each update serializes to a camelCase merge patch containing only the
//! fields that were set. `Option<Option<T>>` fields clear the stored value
//! when set to `None`.

pub mod course;
pub mod kos;
pub mod post;

pub use course::{CourseUpdate, CourseUpdateBuilder};
pub use kos::{KosUpdate, KosUpdateBuilder};
pub use post::{PostUpdate, PostUpdateBuilder};

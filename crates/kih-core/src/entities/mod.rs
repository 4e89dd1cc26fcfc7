//! Entity structs for every document collection.
//!
//! Documents are schema-flexible: arrays, counters, and flags missing from a
//! stored record deserialize to their empty values. `id` is the document key
//! and never part of the stored body. `createdAt` / `updatedAt` are assigned
//! by the store.

mod course;
mod forum;
mod kos;
mod location;

pub use course::CourseInstitution;
pub use forum::{ForumPost, Reply};
pub use kos::KosHomestay;
pub use location::Location;

use crate::enums::Collection;

/// Binds an entity type to the collection it is stored in.
pub trait Document {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// Fields searched by the free-text filter.
pub trait Searchable {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn address(&self) -> &str;

    /// Whether the listing carries the verified badge.
    fn is_verified(&self) -> bool {
        false
    }
}

pub mod auth;
pub mod course;
pub mod doc;
pub mod forum;
pub mod kos;
pub mod location;

pub use auth::AuthCommands;
pub use course::{CourseCommands, PhotoCommands};
pub use doc::DocCommands;
pub use forum::ForumCommands;
pub use kos::KosCommands;
pub use location::LocationCommands;

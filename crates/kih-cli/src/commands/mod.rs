pub mod auth;
pub mod course;
pub mod dispatch;
pub mod doc;
pub mod forum;
pub mod kos;
pub mod location;
pub mod page;
pub mod schema;
pub mod shared;

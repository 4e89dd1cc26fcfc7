use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuthCommands, CourseCommands, DocCommands, ForumCommands, KosCommands, LocationCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Render a portal page by path, e.g. `/kos-homestay?type=kos`.
    Page(PageArgs),
    /// List the portal's pages.
    Routes,
    /// Course institutions.
    Courses {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Kos and homestay listings.
    Kos {
        #[command(subcommand)]
        action: KosCommands,
    },
    /// Angkringan forum posts and replies.
    Forum {
        #[command(subcommand)]
        action: ForumCommands,
    },
    /// Points of interest.
    Locations {
        #[command(subcommand)]
        action: LocationCommands,
    },
    /// Raw document store access.
    Doc {
        #[command(subcommand)]
        action: DocCommands,
    },
    /// Dump JSON schema for an entity type.
    Schema(SchemaArgs),
    /// Accounts and sign-in.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}

/// Arguments for `kih page`.
#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// Path with optional query string.
    #[arg(default_value = "/")]
    pub path: String,
}

/// Arguments for `kih schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: course, kos, post, reply, location, user.
    pub type_name: String,
}

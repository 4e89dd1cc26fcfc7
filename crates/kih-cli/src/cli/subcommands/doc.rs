use clap::{Args, Subcommand};

/// Raw document store commands. Collections: courseInstitutions,
/// kosHomestay, forumPosts, replies, locations.
#[derive(Clone, Debug, Subcommand)]
pub enum DocCommands {
    /// Fetch one document.
    Get { collection: String, id: String },
    /// Fetch documents matching constraints.
    Query(DocQueryArgs),
    /// Insert a JSON object and print its new id.
    Add { collection: String, json: String },
    /// Merge a JSON object into a document; `null` removes a field.
    Update {
        collection: String,
        id: String,
        json: String,
    },
    /// Delete a document.
    Delete { collection: String, id: String },
}

#[derive(Clone, Debug, Args)]
pub struct DocQueryArgs {
    pub collection: String,
    /// `field=value` equality; repeatable. Values parse as JSON when they can.
    #[arg(long = "where")]
    pub where_eq: Vec<String>,
    /// `field=value`, the array field must contain the value; repeatable.
    #[arg(long)]
    pub contains: Vec<String>,
    /// `field` or `field:desc`.
    #[arg(long)]
    pub order: Option<String>,
}

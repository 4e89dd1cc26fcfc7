use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Course institution commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// List courses, optionally filtered.
    List(CourseListArgs),
    /// Show one course.
    Get { id: String },
    /// Listing photos.
    Photo {
        #[command(subcommand)]
        action: PhotoCommands,
    },
}

#[derive(Clone, Debug, Default, Args)]
pub struct CourseListArgs {
    /// Case-insensitive text in name, description, or address.
    #[arg(long)]
    pub search: Option<String>,
    /// Offered program, e.g. `Speaking`.
    #[arg(long)]
    pub program: Option<String>,
    /// Price range label.
    #[arg(long)]
    pub price_range: Option<String>,
    /// Only verified institutions.
    #[arg(long)]
    pub verified: bool,
    /// Include the option lists for each filter.
    #[arg(long)]
    pub options: bool,
}

/// Photo commands shared by courses and kos listings.
#[derive(Clone, Debug, Subcommand)]
pub enum PhotoCommands {
    /// Upload a photo and attach its URL to the listing.
    Add { id: String, file: PathBuf },
}

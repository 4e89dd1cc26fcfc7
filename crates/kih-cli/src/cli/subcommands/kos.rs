use clap::{Args, Subcommand};

use crate::cli::subcommands::PhotoCommands;

/// Kos and homestay commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KosCommands {
    /// List kos and homestays, optionally filtered.
    List(KosListArgs),
    /// Show one listing.
    Get { id: String },
    /// Listing photos.
    Photo {
        #[command(subcommand)]
        action: PhotoCommands,
    },
}

#[derive(Clone, Debug, Default, Args)]
pub struct KosListArgs {
    /// Case-insensitive text in name, description, or address.
    #[arg(long)]
    pub search: Option<String>,
    /// `kos` or `homestay`.
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// `male`, `female`, or `mixed`.
    #[arg(long)]
    pub gender: Option<String>,
    /// Lowest monthly price, inclusive.
    #[arg(long)]
    pub min_price: Option<String>,
    /// Highest monthly price, inclusive.
    #[arg(long)]
    pub max_price: Option<String>,
    /// Price bucket: `<500000`, `500000-1000000`, or `>1000000`.
    #[arg(long)]
    pub price: Option<String>,
    /// Required facility; repeat for several.
    #[arg(long)]
    pub facility: Vec<String>,
    /// Only verified listings.
    #[arg(long)]
    pub verified: bool,
    /// Include the option lists for each filter.
    #[arg(long)]
    pub options: bool,
}

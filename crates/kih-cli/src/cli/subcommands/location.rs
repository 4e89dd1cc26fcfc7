use clap::{Args, Subcommand};

/// Points of interest commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LocationCommands {
    /// List places with their map markers.
    List(LocationListArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct LocationListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// One of restaurant, bank, atm, hospital, shopping, transport, other.
    #[arg(long)]
    pub category: Option<String>,
}

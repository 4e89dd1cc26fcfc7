use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `kih` binary.
#[derive(Debug, Parser)]
#[command(
    name = "kih",
    version,
    about = "Kampung Inggris Digital Hub - courses, kos, places, and the Angkringan forum"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Spinners: auto, on, off
    #[arg(long, global = true, default_value = "auto")]
    pub progress: ProgressMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{ForumCommands, KosCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "kih", "--format", "table", "--limit", "10", "--verbose", "forum", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Forum {
                action: ForumCommands::List(_)
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["kih", "locations", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["kih", "--format", "xml", "courses", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn kos_filters_parse() {
        let cli = Cli::try_parse_from([
            "kih",
            "kos",
            "list",
            "--min-price",
            "500000",
            "--type",
            "kos",
            "--facility",
            "WiFi",
            "--facility",
            "AC",
        ])
        .expect("cli should parse");

        let Commands::Kos {
            action: KosCommands::List(args),
        } = cli.command
        else {
            panic!("expected kos list");
        };
        assert_eq!(args.min_price.as_deref(), Some("500000"));
        assert_eq!(args.kind.as_deref(), Some("kos"));
        assert_eq!(args.facility, vec!["WiFi", "AC"]);
    }

    #[test]
    fn page_takes_path_with_query() {
        let cli = Cli::try_parse_from(["kih", "page", "/kos-homestay?minPrice=500000"])
            .expect("cli should parse");
        let Commands::Page(args) = cli.command else {
            panic!("expected page");
        };
        assert_eq!(args.path, "/kos-homestay?minPrice=500000");
    }
}

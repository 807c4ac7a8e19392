//! Core CLI definitions

use clap::{Parser, Subcommand};

use super::rank::{ParseArgs, RankArgs};

/// Output format for rank and parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "azerank")]
#[command(about = "Rank azerite items from a character export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank the azerite items of an export against the published datasets
    #[command(visible_alias = "r")]
    Rank(RankArgs),

    /// Show the items and character found in an export without ranking
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the base URL datasets are fetched from
        #[arg(long)]
        base_url: Option<String>,

        /// Set the default fight style (e.g. patchwerk, hecticaddcleave)
        #[arg(long)]
        fight_style: Option<String>,

        /// Set the HTTP timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

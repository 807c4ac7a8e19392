//! Rank and parse command CLI definitions

use clap::Args;
use std::path::PathBuf;

use super::core::OutputFormat;

#[derive(Args)]
pub struct RankArgs {
    /// Path to the export text (reads stdin if omitted)
    pub input: Option<PathBuf>,

    /// Class token to use instead of the one in the export (e.g. "death_knight")
    #[arg(long = "class")]
    pub class_name: Option<String>,

    /// Spec token to use instead of the one in the export (e.g. "unholy")
    #[arg(long)]
    pub spec: Option<String>,

    /// Fight style of the datasets (uses configured default if not provided)
    #[arg(long)]
    pub fight_style: Option<String>,

    /// Base URL datasets are fetched from (uses configured default if not provided)
    #[arg(long, env = "AZERANK_BASE_URL")]
    pub base_url: Option<String>,

    /// Read datasets from this directory instead of fetching them
    #[arg(long)]
    pub datasets_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Take item levels from the bonus list instead of the default level
    #[arg(long)]
    pub ilvl_from_bonus: bool,

    /// Item level whose values order the items
    #[arg(long, default_value_t = azerank::REFERENCE_LEVEL)]
    pub reference_level: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Path to the export text (reads stdin if omitted)
    pub input: Option<PathBuf>,

    /// Take item levels from the bonus list instead of the default level
    #[arg(long)]
    pub ilvl_from_bonus: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

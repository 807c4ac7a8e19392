//! CLI argument definitions for azerank
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod rank;

pub use core::{Cli, Commands, OutputFormat};
pub use rank::{ParseArgs, RankArgs};

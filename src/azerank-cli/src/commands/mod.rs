//! Command handlers for azerank CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod parse;
pub mod rank;

//! Parse command handler

use anyhow::Result;
use azerank::ItemLevelPolicy;

use crate::cli::{OutputFormat, ParseArgs};
use crate::file_io;
use crate::render;

/// Handle `parse`
pub fn handle(args: ParseArgs) -> Result<()> {
    let text = file_io::read_input(args.input.as_deref())?;
    let export = azerank::parse_export(&text, ilvl_policy(args.ilvl_from_bonus));

    let output = match args.format {
        OutputFormat::Table => render::items_table(&export),
        OutputFormat::Json => render::to_json(&export)?,
    };
    file_io::write_output(None, &output)
}

pub fn ilvl_policy(from_bonus: bool) -> ItemLevelPolicy {
    if from_bonus {
        ItemLevelPolicy::BonusCode
    } else {
        ItemLevelPolicy::Fixed
    }
}

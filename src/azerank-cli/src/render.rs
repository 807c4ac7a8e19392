//! Text and JSON rendering of parsed exports and rankings

use anyhow::Result;
use azerank::{CharacterMetadata, ParsedExport, ParsedItem, PipelineResult, RankedItem, THRESHOLD_LEVELS};
use serde::Serialize;
use std::fmt::Write;

/// JSON document written by `rank --format json`
#[derive(Serialize)]
pub struct RankReport<'a> {
    pub metadata: &'a CharacterMetadata,
    pub rejected: usize,
    pub rankings: &'a PipelineResult,
}

/// One-line character summary
pub fn character_line(metadata: &CharacterMetadata) -> String {
    format!(
        "{} ({} {})",
        metadata.character_name.as_deref().unwrap_or("Unknown character"),
        metadata.class_name.as_deref().unwrap_or("?"),
        metadata.spec.as_deref().unwrap_or("?"),
    )
}

/// Table of parsed items, in export order
pub fn items_table(export: &ParsedExport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", character_line(&export.metadata));
    let _ = writeln!(out);

    if export.items.is_empty() {
        let _ = writeln!(out, "No azerite items found");
    } else {
        let header = format!("{:<10} {:>8} {:>6} {:>6}  {}", "slot", "id", "ilvl", "code", "powers");
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "{}", "-".repeat(header.len()));
        for item in &export.items {
            let _ = writeln!(out, "{}", item_row(item));
        }
    }

    if export.rejected > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} azerite line(s) skipped", export.rejected);
    }
    out
}

fn item_row(item: &ParsedItem) -> String {
    let code = item
        .ilvl_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    let powers = item
        .azerite_powers
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "{:<10} {:>8} {:>6} {:>6}  {}",
        item.slot.token(),
        item.id,
        item.ilvl,
        code,
        powers
    )
}

/// Per-slot ranking tables, best item first
pub fn rankings_table(metadata: &CharacterMetadata, result: &PipelineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", character_line(metadata));

    let name_width = result
        .iter()
        .flat_map(|(_, ranking)| ranking.iter())
        .map(|r| display_name(r).len())
        .max()
        .unwrap_or(0)
        .max(4);

    for (slot, ranking) in result.iter() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", slot);

        if ranking.is_empty() {
            let _ = writeln!(out, "  (no items)");
            continue;
        }

        let mut header = format!("  {:>2}  {:<width$} {:>8}", "#", "name", "id", width = name_width);
        for level in THRESHOLD_LEVELS {
            let _ = write!(header, " {:>8}", level);
        }
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "  {}", "-".repeat(header.len() - 2));

        for (idx, ranked) in ranking.iter().enumerate() {
            let mut row = format!(
                "  {:>2}  {:<width$} {:>8}",
                idx + 1,
                display_name(ranked),
                ranked.item.id,
                width = name_width
            );
            for level in THRESHOLD_LEVELS {
                let value = ranked
                    .value_at(*level)
                    .map(|v| format!("{:.0}", v))
                    .unwrap_or_else(|| "-".to_string());
                let _ = write!(row, " {:>8}", value);
            }
            let _ = writeln!(out, "{}", row);
        }
    }
    out
}

fn display_name(ranked: &RankedItem) -> &str {
    ranked.name.as_deref().unwrap_or("(unknown item)")
}

/// Pretty JSON with a trailing newline
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

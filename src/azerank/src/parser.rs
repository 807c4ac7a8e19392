//! Export line parsing
//!
//! Character exports list one directive per line. Azerite gear shows up as
//! item lines such as:
//!
//! ```text
//! head=,id=159302,bonus_id=4819/1512/4786,reforge=0,azerite_powers=30/461/21/13
//! # chest=,id=165822,bonus_id=4824/1517/4786,reforge=0,azerite_powers=560/22/13
//! ```
//!
//! Equipped items and the commented-out bag items both count. Lines without
//! the `azerite_powers` marker are never inspected further.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::reference::DEFAULT_ITEM_LEVEL;
use crate::slot::ItemSlot;

/// Substring that marks an item line with azerite powers
pub const AZERITE_MARKER: &str = "azerite_powers";

/// How the effective item level of a parsed item is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLevelPolicy {
    /// Record the code derived from the bonus list, but rank every item at
    /// [`DEFAULT_ITEM_LEVEL`]
    #[default]
    Fixed,
    /// Use the derived bonus code as the item level, falling back to
    /// [`DEFAULT_ITEM_LEVEL`] when the bonus list has no usable code
    BonusCode,
}

/// An azerite item recognized in the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItem {
    pub slot: ItemSlot,
    pub id: String,
    pub ilvl: u32,
    /// Second-to-last entry of the bonus list, when numeric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilvl_code: Option<u32>,
    #[serde(default)]
    pub bonus_ids: Vec<u32>,
    #[serde(default)]
    pub azerite_powers: Vec<u32>,
}

/// Why a line did not produce an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The line has no azerite marker
    NoMarker,
    /// The line has the marker but not the item shape
    PatternMismatch,
    /// The item shape matched but the slot is not an azerite slot
    UnknownSlot(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMarker => write!(f, "no azerite marker"),
            Self::PatternMismatch => write!(f, "not an item line"),
            Self::UnknownSlot(token) => write!(f, "unknown slot '{}'", token),
        }
    }
}

/// Items found in a whole export, with a count of marker lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemScan {
    pub items: Vec<ParsedItem>,
    pub rejected: usize,
}

fn item_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r#"(?P<slot>\w+)="{0,2},id=(?P<id>\d+)"#,
            r".*?bonus_id=(?P<bonus>[^,]*)",
            r".*?,reforge=[^,]*",
            r".*?azerite_powers=(?P<powers>[^,\s]*)",
        ))
        .expect("item line regex must compile")
    })
}

/// Parse one export line into an item
pub fn parse_line(line: &str, policy: ItemLevelPolicy) -> Result<ParsedItem, Rejection> {
    if !line.contains(AZERITE_MARKER) {
        return Err(Rejection::NoMarker);
    }

    let caps = item_line_re()
        .captures(line)
        .ok_or(Rejection::PatternMismatch)?;

    let token = &caps["slot"];
    let slot = ItemSlot::from_token(token).ok_or_else(|| Rejection::UnknownSlot(token.to_string()))?;

    let bonus = &caps["bonus"];
    let ilvl_code = ilvl_code_from_bonus(bonus);
    let ilvl = match policy {
        ItemLevelPolicy::Fixed => DEFAULT_ITEM_LEVEL,
        ItemLevelPolicy::BonusCode => ilvl_code.unwrap_or(DEFAULT_ITEM_LEVEL),
    };

    Ok(ParsedItem {
        slot,
        id: caps["id"].to_string(),
        ilvl,
        ilvl_code,
        bonus_ids: numeric_list(bonus),
        azerite_powers: numeric_list(&caps["powers"]),
    })
}

/// Parse every line of an export, keeping items in text order
pub fn parse_items(text: &str, policy: ItemLevelPolicy) -> ItemScan {
    let mut scan = ItemScan::default();

    for (idx, line) in text.lines().enumerate() {
        match parse_line(line, policy) {
            Ok(item) => {
                tracing::debug!(line = idx + 1, slot = %item.slot, id = %item.id, "parsed item");
                scan.items.push(item);
            }
            Err(Rejection::NoMarker) => {}
            Err(reason) => {
                tracing::debug!(line = idx + 1, %reason, "skipped azerite line");
                scan.rejected += 1;
            }
        }
    }

    scan
}

/// Reverse the bonus list and take its second entry
fn ilvl_code_from_bonus(bonus: &str) -> Option<u32> {
    bonus.split('/').rev().nth(1)?.trim().parse().ok()
}

fn numeric_list(list: &str) -> Vec<u32> {
    list.split('/')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

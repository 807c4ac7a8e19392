//! Equipment slots that carry azerite powers

use serde::{Deserialize, Serialize};

/// Equipment slot of an azerite item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    Head,
    Shoulder,
    Chest,
}

impl ItemSlot {
    /// All slots, in display order
    pub const ALL: [ItemSlot; 3] = [ItemSlot::Head, ItemSlot::Shoulder, ItemSlot::Chest];

    /// Parse the slot token that starts an item line in the export
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "head" => Some(Self::Head),
            "shoulder" | "shoulders" => Some(Self::Shoulder),
            "chest" => Some(Self::Chest),
            _ => None,
        }
    }

    /// Token as written in the export
    pub fn token(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Shoulder => "shoulder",
            Self::Chest => "chest",
        }
    }

    /// Slot name used in ranking dataset file names
    pub fn dataset_slug(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Shoulder => "shoulders",
            Self::Chest => "chest",
        }
    }
}

impl std::fmt::Display for ItemSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for ItemSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("Unknown item slot: {}", s))
    }
}

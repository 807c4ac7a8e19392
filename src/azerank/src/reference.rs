//! Reference data for azerite rankings
//!
//! Hardcoded tables for class and spec tokens as they appear in exports
//! and dataset file names, plus the item level tiers the ranking datasets
//! publish values for.

// ============================================================================
// Classes
// ============================================================================

/// Class information as used in export text and dataset names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub token: &'static str,
    pub name: &'static str,
    pub specs: &'static [&'static str],
}

/// All playable classes
pub const CLASSES: &[ClassInfo] = &[
    ClassInfo {
        token: "death_knight",
        name: "Death Knight",
        specs: &["blood", "frost", "unholy"],
    },
    ClassInfo {
        token: "demon_hunter",
        name: "Demon Hunter",
        specs: &["havoc", "vengeance"],
    },
    ClassInfo {
        token: "druid",
        name: "Druid",
        specs: &["balance", "feral", "guardian", "restoration"],
    },
    ClassInfo {
        token: "hunter",
        name: "Hunter",
        specs: &["beast_mastery", "marksmanship", "survival"],
    },
    ClassInfo {
        token: "mage",
        name: "Mage",
        specs: &["arcane", "fire", "frost"],
    },
    ClassInfo {
        token: "monk",
        name: "Monk",
        specs: &["brewmaster", "mistweaver", "windwalker"],
    },
    ClassInfo {
        token: "paladin",
        name: "Paladin",
        specs: &["holy", "protection", "retribution"],
    },
    ClassInfo {
        token: "priest",
        name: "Priest",
        specs: &["discipline", "holy", "shadow"],
    },
    ClassInfo {
        token: "rogue",
        name: "Rogue",
        specs: &["assassination", "outlaw", "subtlety"],
    },
    ClassInfo {
        token: "shaman",
        name: "Shaman",
        specs: &["elemental", "enhancement", "restoration"],
    },
    ClassInfo {
        token: "warlock",
        name: "Warlock",
        specs: &["affliction", "demonology", "destruction"],
    },
    ClassInfo {
        token: "warrior",
        name: "Warrior",
        specs: &["arms", "fury", "protection"],
    },
];

/// Get class info by export token (e.g. "death_knight")
pub fn class_by_token(token: &str) -> Option<&'static ClassInfo> {
    CLASSES.iter().find(|c| c.token == token)
}

/// Check whether `spec` is a spec token of the given class
pub fn is_known_spec(class_token: &str, spec: &str) -> bool {
    class_by_token(class_token).is_some_and(|c| c.specs.contains(&spec))
}

// ============================================================================
// Threshold levels
// ============================================================================

/// Item level tiers the ranking datasets publish values for, lowest first
pub const THRESHOLD_LEVELS: &[u32] = &[340, 355, 370, 385];

/// Tier used to order items within a slot
pub const REFERENCE_LEVEL: u32 = 340;

/// Effective item level assigned to parsed items when none is derived
pub const DEFAULT_ITEM_LEVEL: u32 = 340;

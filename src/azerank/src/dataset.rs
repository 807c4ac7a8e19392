//! Ranking dataset model
//!
//! One dataset is published per class, spec, slot and fight style. The JSON
//! shape is:
//!
//! ```json
//! {
//!   "data": { "Sunscale Chestguard": { "1_340": 5120, "1_355": 5410 } },
//!   "sorted_data_keys": ["Sunscale Chestguard"],
//!   "item_ids": { "Sunscale Chestguard": 165822 },
//!   "used_azerite_traits_per_item": {
//!     "Sunscale Chestguard": [{ "id": 560, "name": "Bonded Souls", "spell_id": 288802 }]
//!   }
//! }
//! ```
//!
//! Threshold keys may be plain levels (`"340"`) or carry a stack prefix
//! (`"1_340"`). Item ids may be strings or numbers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use crate::slot::ItemSlot;

/// Values of one item at each published threshold level
///
/// Cells that are not numbers decode as `None` instead of failing the whole
/// dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankValues(pub BTreeMap<String, Option<f64>>);

impl RankValues {
    /// Value at the given item level, or `None` if absent, non-numeric or NaN
    pub fn value_at(&self, level: u32) -> Option<f64> {
        self.0
            .get(&level.to_string())
            .or_else(|| self.0.get(&format!("1_{}", level)))
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
    }
}

impl<'de> Deserialize<'de> for RankValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(key, value)| (key, value.as_f64()))
                .collect(),
        ))
    }
}

impl FromIterator<(String, f64)> for RankValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key, Some(value))).collect())
    }
}

/// Azerite trait the simulation selected for an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzeriteTrait {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spell_id: u32,
}

/// Published rankings for one slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingDataset {
    /// Item name to threshold values
    pub data: BTreeMap<String, RankValues>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorted_data_keys: Vec<String>,

    /// Item name to item id
    #[serde(default, deserialize_with = "ids_as_strings")]
    pub item_ids: BTreeMap<String, String>,

    /// Item name to the traits used when simulating it
    #[serde(default, deserialize_with = "traits_one_or_many")]
    pub used_azerite_traits_per_item: BTreeMap<String, Vec<AzeriteTrait>>,
}

impl RankingDataset {
    /// Parse a dataset from its JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the id to item name lookup
    ///
    /// Names are visited in sorted order and a later name overwrites an
    /// earlier one carrying the same id, so collisions always resolve to
    /// the greatest name.
    pub fn id_index(&self) -> HashMap<&str, &str> {
        let mut index = HashMap::with_capacity(self.item_ids.len());
        for (name, id) in &self.item_ids {
            index.insert(id.as_str(), name.as_str());
        }
        index
    }

    /// Threshold values for an item name
    pub fn ranks_for(&self, name: &str) -> Option<&RankValues> {
        self.data.get(name)
    }

    /// Traits used for an item name
    pub fn traits_for(&self, name: &str) -> &[AzeriteTrait] {
        self.used_azerite_traits_per_item
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The three per-slot datasets for one class and spec
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDatasets {
    pub head: RankingDataset,
    pub chest: RankingDataset,
    pub shoulders: RankingDataset,
}

impl SlotDatasets {
    pub fn for_slot(&self, slot: ItemSlot) -> &RankingDataset {
        match slot {
            ItemSlot::Head => &self.head,
            ItemSlot::Shoulder => &self.shoulders,
            ItemSlot::Chest => &self.chest,
        }
    }
}

fn ids_as_strings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    let raw = BTreeMap::<String, RawId>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, id)| {
            let id = match id {
                RawId::Text(s) => s,
                RawId::Number(n) => n.to_string(),
            };
            (name, id)
        })
        .collect())
}

fn traits_one_or_many<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<AzeriteTrait>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(AzeriteTrait),
        Many(Vec<AzeriteTrait>),
    }

    let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, traits)| {
            let traits = match traits {
                OneOrMany::One(t) => vec![t],
                OneOrMany::Many(list) => list,
            };
            (name, traits)
        })
        .collect())
}

//! Joining parsed items against ranking datasets
//!
//! Each slot is handled on its own: the slot's items are named through the
//! dataset's id index, given their threshold values, and ordered by the
//! value at the reference level. Items that cannot be named or valued stay
//! in the output with empty fields.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{RankValues, RankingDataset, SlotDatasets};
use crate::parser::ParsedItem;
use crate::slot::ItemSlot;

/// A parsed item with its dataset name and values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: ParsedItem,
    pub name: Option<String>,
    pub ranks: Option<RankValues>,
}

impl RankedItem {
    /// Value used for ordering
    pub fn value_at(&self, level: u32) -> Option<f64> {
        self.ranks.as_ref().and_then(|r| r.value_at(level))
    }
}

/// Items of one slot, best first
pub type SlotRanking = Vec<RankedItem>;

/// Rankings for every azerite slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub head: SlotRanking,
    pub shoulder: SlotRanking,
    pub chest: SlotRanking,
}

impl PipelineResult {
    pub fn slot(&self, slot: ItemSlot) -> &SlotRanking {
        match slot {
            ItemSlot::Head => &self.head,
            ItemSlot::Shoulder => &self.shoulder,
            ItemSlot::Chest => &self.chest,
        }
    }

    fn slot_mut(&mut self, slot: ItemSlot) -> &mut SlotRanking {
        match slot {
            ItemSlot::Head => &mut self.head,
            ItemSlot::Shoulder => &mut self.shoulder,
            ItemSlot::Chest => &mut self.chest,
        }
    }

    /// Slots with their rankings, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ItemSlot, &SlotRanking)> {
        ItemSlot::ALL.into_iter().map(move |slot| (slot, self.slot(slot)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, ranking)| ranking.is_empty())
    }
}

/// Rank the items of every slot against that slot's dataset
pub fn correlate(
    datasets: &SlotDatasets,
    items: &[ParsedItem],
    reference_level: u32,
) -> PipelineResult {
    let mut result = PipelineResult::default();
    for slot in ItemSlot::ALL {
        *result.slot_mut(slot) = rank_slot(slot, items, datasets.for_slot(slot), reference_level);
    }
    result
}

/// Rank the items of one slot
pub fn rank_slot(
    slot: ItemSlot,
    items: &[ParsedItem],
    dataset: &RankingDataset,
    reference_level: u32,
) -> SlotRanking {
    let index = dataset.id_index();

    let mut ranked: SlotRanking = items
        .iter()
        .filter(|item| item.slot == slot)
        .map(|item| {
            let name = index.get(item.id.as_str()).map(|n| n.to_string());
            let ranks = name
                .as_deref()
                .and_then(|n| dataset.ranks_for(n))
                .cloned();
            if name.is_none() {
                tracing::debug!(%slot, id = %item.id, "item id not in dataset");
            }
            RankedItem {
                item: item.clone(),
                name,
                ranks,
            }
        })
        .collect();

    ranked.sort_by(|a, b| compare_by_value(a, b, reference_level));
    ranked
}

/// Descending by value; items without a value go last
fn compare_by_value(a: &RankedItem, b: &RankedItem, level: u32) -> Ordering {
    match (a.value_at(level), b.value_at(level)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::REFERENCE_LEVEL;

    fn item(slot: ItemSlot, id: &str) -> ParsedItem {
        ParsedItem {
            slot,
            id: id.to_string(),
            ilvl: 340,
            ilvl_code: None,
            bonus_ids: Vec::new(),
            azerite_powers: Vec::new(),
        }
    }

    fn values(v: f64) -> RankValues {
        [("340".to_string(), v)].into_iter().collect()
    }

    fn dataset(entries: &[(&str, &str, Option<f64>)]) -> RankingDataset {
        let mut dataset = RankingDataset::default();
        for (name, id, value) in entries {
            dataset.item_ids.insert(name.to_string(), id.to_string());
            if let Some(v) = value {
                dataset.data.insert(name.to_string(), values(*v));
            }
        }
        dataset
    }

    #[test]
    fn test_sort_descending_with_missing_last() {
        let ds = dataset(&[("A", "1", Some(10.0)), ("B", "2", Some(20.0)), ("C", "3", None)]);
        let items = vec![
            item(ItemSlot::Head, "3"),
            item(ItemSlot::Head, "1"),
            item(ItemSlot::Head, "2"),
        ];
        let ranked = rank_slot(ItemSlot::Head, &items, &ds, REFERENCE_LEVEL);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("B"), Some("A"), Some("C")]);
        assert!(ranked[2].ranks.is_none());
    }

    #[test]
    fn test_unresolved_ids_are_kept_last_in_input_order() {
        let ds = dataset(&[("A", "1", Some(10.0))]);
        let items = vec![
            item(ItemSlot::Chest, "900"),
            item(ItemSlot::Chest, "1"),
            item(ItemSlot::Chest, "901"),
        ];
        let ranked = rank_slot(ItemSlot::Chest, &items, &ds, REFERENCE_LEVEL);
        let ids: Vec<_> = ranked.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "900", "901"]);
        assert_eq!(ranked[1].name, None);
        assert_eq!(ranked[1].ranks, None);
    }

    #[test]
    fn test_ranks_only_when_named() {
        let ds = dataset(&[("A", "1", None)]);
        let ranked = rank_slot(ItemSlot::Head, &[item(ItemSlot::Head, "1")], &ds, REFERENCE_LEVEL);
        assert_eq!(ranked[0].name.as_deref(), Some("A"));
        assert_eq!(ranked[0].ranks, None);
    }

    #[test]
    fn test_missing_reference_key_sorts_last() {
        let mut ds = dataset(&[("A", "1", Some(5.0)), ("B", "2", None)]);
        ds.data
            .insert("B".to_string(), [("385".to_string(), 99.0)].into_iter().collect());
        let items = vec![item(ItemSlot::Head, "2"), item(ItemSlot::Head, "1")];
        let ranked = rank_slot(ItemSlot::Head, &items, &ds, REFERENCE_LEVEL);
        assert_eq!(ranked[0].name.as_deref(), Some("A"));
        assert_eq!(ranked[1].name.as_deref(), Some("B"));
        assert!(ranked[1].ranks.is_some());
    }

    #[test]
    fn test_repeated_runs_resolve_identically() {
        let mut ds = RankingDataset::default();
        ds.item_ids.insert("Foo".to_string(), "1".to_string());
        ds.item_ids.insert("Foo (Warforged)".to_string(), "2".to_string());
        ds.data.insert("Foo".to_string(), values(1.0));
        let items = vec![item(ItemSlot::Head, "1"), item(ItemSlot::Head, "2")];
        let first = rank_slot(ItemSlot::Head, &items, &ds, REFERENCE_LEVEL);
        let second = rank_slot(ItemSlot::Head, &items, &ds, REFERENCE_LEVEL);
        assert_eq!(first, second);
        assert_eq!(first[0].name.as_deref(), Some("Foo"));
        assert_eq!(first[1].name.as_deref(), Some("Foo (Warforged)"));
    }

    #[test]
    fn test_correlate_groups_by_slot() {
        let datasets = SlotDatasets {
            head: dataset(&[("Helm", "1", Some(3.0))]),
            chest: dataset(&[("Vest", "2", Some(4.0))]),
            shoulders: dataset(&[("Pads", "3", Some(5.0))]),
        };
        let items = vec![
            item(ItemSlot::Chest, "2"),
            item(ItemSlot::Head, "1"),
            item(ItemSlot::Shoulder, "3"),
            item(ItemSlot::Head, "2"),
        ];
        let result = correlate(&datasets, &items, REFERENCE_LEVEL);
        assert_eq!(result.head.len(), 2);
        assert_eq!(result.head[0].name.as_deref(), Some("Helm"));
        // id 2 is only known to the chest dataset
        assert_eq!(result.head[1].name, None);
        assert_eq!(result.chest[0].name.as_deref(), Some("Vest"));
        assert_eq!(result.shoulder[0].name.as_deref(), Some("Pads"));
        assert!(!result.is_empty());
    }

    #[test]
    fn test_empty_items_give_empty_result() {
        let result = correlate(&SlotDatasets::default(), &[], REFERENCE_LEVEL);
        assert!(result.is_empty());
        assert_eq!(result.iter().count(), 3);
    }
}

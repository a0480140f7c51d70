//! Core-item deduplication.
//!
//! Outfits built from the same layer/top/bottom items are the same "look"
//! regardless of footwear or accessories. Only the most recently worn outfit
//! of each look is scored; the size of the look's group becomes its wear
//! count.

use std::collections::HashMap;

use crate::outfit::OutfitRecord;

/// Separator between item ids in a core-item key.
pub const CORE_KEY_SEPARATOR: &str = "|";

/// Sorted, pipe-joined ids of the outfit's layer/top/bottom items.
///
/// Empty when the outfit has no core items.
pub fn core_item_key(outfit: &OutfitRecord) -> String {
    let mut ids: Vec<_> = outfit
        .items
        .iter()
        .filter(|i| i.item_type.is_core())
        .map(|i| i.item_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(CORE_KEY_SEPARATOR)
}

/// Representative of a look, with the number of outfits that share it.
#[derive(Debug, Clone)]
pub struct DedupedOutfit {
    pub outfit: OutfitRecord,
    pub core_key: String,
    pub wear_count: usize,
}

/// Collapse outfits sharing a non-empty core-item key.
///
/// The representative is the outfit with the latest wear date; ghost outfits
/// sort oldest and ties keep the first one seen. Outfits with an empty key
/// are kept as singletons. Output follows the order in which each group
/// first appeared.
pub fn deduplicate(outfits: Vec<OutfitRecord>) -> Vec<DedupedOutfit> {
    let mut groups: Vec<DedupedOutfit> = Vec::with_capacity(outfits.len());
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for outfit in outfits {
        let core_key = core_item_key(&outfit);

        if core_key.is_empty() {
            groups.push(DedupedOutfit {
                outfit,
                core_key,
                wear_count: 1,
            });
            continue;
        }

        match index_by_key.get(&core_key) {
            Some(&idx) => {
                let group = &mut groups[idx];
                group.wear_count += 1;
                if outfit.wear_date > group.outfit.wear_date {
                    group.outfit = outfit;
                }
            }
            None => {
                index_by_key.insert(core_key.clone(), groups.len());
                groups.push(DedupedOutfit {
                    outfit,
                    core_key,
                    wear_count: 1,
                });
            }
        }
    }

    tracing::debug!(
        groups = groups.len(),
        looks = index_by_key.len(),
        "Deduplicated outfits by core items",
    );

    groups
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::outfit::{ItemType, OutfitItem, Rating};
    use crate::types::DbId;

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, day)
    }

    fn outfit(id: DbId, wear_date: Option<NaiveDate>, items: &[(DbId, ItemType)]) -> OutfitRecord {
        OutfitRecord {
            id,
            name: None,
            rating: Rating::Mid,
            wear_date,
            items: items
                .iter()
                .map(|&(item_id, item_type)| OutfitItem { item_id, item_type })
                .collect(),
            tag_ids: vec![],
        }
    }

    #[test]
    fn key_is_sorted_and_ignores_non_core() {
        let o = outfit(
            1,
            date(1),
            &[
                (30, ItemType::Bottom),
                (4, ItemType::Footwear),
                (12, ItemType::Top),
                (2, ItemType::Layer),
                (7, ItemType::Accessory),
            ],
        );
        assert_eq!(core_item_key(&o), "2|12|30");
    }

    #[test]
    fn key_empty_without_core_items() {
        let o = outfit(1, date(1), &[(4, ItemType::Footwear)]);
        assert_eq!(core_item_key(&o), "");
    }

    #[test]
    fn keeps_most_recent_and_counts_group() {
        let look = [(1, ItemType::Top), (2, ItemType::Bottom)];
        let outfits = vec![
            outfit(10, date(1), &look),
            outfit(11, date(20), &look),
            outfit(12, date(5), &look),
        ];

        let deduped = deduplicate(outfits);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].outfit.id, 11);
        assert_eq!(deduped[0].wear_count, 3);
    }

    #[test]
    fn footwear_swap_is_still_the_same_look() {
        let outfits = vec![
            outfit(1, date(1), &[(1, ItemType::Top), (2, ItemType::Bottom), (3, ItemType::Footwear)]),
            outfit(2, date(2), &[(1, ItemType::Top), (2, ItemType::Bottom), (4, ItemType::Footwear)]),
        ];
        let deduped = deduplicate(outfits);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].outfit.id, 2);
    }

    #[test]
    fn ghost_loses_to_any_dated_outfit() {
        let look = [(1, ItemType::Top)];
        let deduped = deduplicate(vec![outfit(1, None, &look), outfit(2, date(1), &look)]);
        assert_eq!(deduped[0].outfit.id, 2);

        let deduped = deduplicate(vec![outfit(2, date(1), &look), outfit(1, None, &look)]);
        assert_eq!(deduped[0].outfit.id, 2);
    }

    #[test]
    fn equal_dates_keep_first_seen() {
        let look = [(1, ItemType::Top)];
        let deduped = deduplicate(vec![outfit(1, date(3), &look), outfit(2, date(3), &look)]);
        assert_eq!(deduped[0].outfit.id, 1);
    }

    #[test]
    fn empty_keys_are_never_merged() {
        let shoes = [(9, ItemType::Footwear)];
        let deduped = deduplicate(vec![outfit(1, date(1), &shoes), outfit(2, date(2), &shoes)]);
        assert_eq!(deduped.len(), 2);
        assert!(deduped.iter().all(|d| d.wear_count == 1));
    }

    #[test]
    fn output_keys_are_unique() {
        let outfits = vec![
            outfit(1, date(1), &[(1, ItemType::Top)]),
            outfit(2, date(2), &[(2, ItemType::Top)]),
            outfit(3, date(3), &[(1, ItemType::Top)]),
            outfit(4, date(4), &[(2, ItemType::Top), (3, ItemType::Bottom)]),
        ];
        let deduped = deduplicate(outfits);
        let keys: HashSet<_> = deduped.iter().map(|d| d.core_key.clone()).collect();
        assert_eq!(keys.len(), deduped.len());
        assert_eq!(deduped.len(), 3);
    }
}

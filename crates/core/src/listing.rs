//! General (non-suggestion) outfit listing.
//!
//! Applies only the availability gate and an optional tag filter: incomplete
//! outfits and repeated looks are listed as-is.

use std::collections::HashSet;

use serde::Serialize;

use crate::eligibility::{availability_gate, tag_gate};
use crate::outfit::{OutfitRecord, Rating};
use crate::ranking::{paginate, Page, PageRequest};
use crate::types::DbId;
use crate::virtual_tags::{virtual_tags_for, TagFilter};

/// An outfit as returned to clients: its stored fields plus the ids of the
/// virtual tags it matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitView {
    #[serde(flatten)]
    pub outfit: OutfitRecord,
    pub virtual_tags: Vec<&'static str>,
}

impl From<OutfitRecord> for OutfitView {
    fn from(outfit: OutfitRecord) -> Self {
        let virtual_tags = virtual_tags_for(&outfit);
        Self {
            outfit,
            virtual_tags,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListingQuery {
    pub page: PageRequest,
    pub tag_filter: Option<TagFilter>,
    pub min_rating: Rating,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            tag_filter: None,
            min_rating: Rating::Miss,
        }
    }
}

/// Filter and page outfits for a general listing, newest first with ghost
/// outfits last.
pub fn select_listing(
    outfits: Vec<OutfitRecord>,
    unavailable: &HashSet<DbId>,
    query: &ListingQuery,
) -> Page<OutfitRecord> {
    let eligible = availability_gate(outfits, unavailable, query.min_rating);
    let mut tagged = tag_gate(eligible, query.tag_filter.as_ref());
    tagged.sort_by(|a, b| b.wear_date.cmp(&a.wear_date).then(b.id.cmp(&a.id)));
    paginate(tagged, query.page)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::outfit::{ItemType, OutfitItem};
    use crate::virtual_tags::VirtualTag;

    fn outfit(id: DbId, rating: Rating, day: Option<u32>, items: &[(DbId, ItemType)]) -> OutfitRecord {
        OutfitRecord {
            id,
            name: Some(format!("Outfit {id}")),
            rating,
            wear_date: day.and_then(|d| NaiveDate::from_ymd_opt(2024, 5, d)),
            items: items
                .iter()
                .map(|&(item_id, item_type)| OutfitItem { item_id, item_type })
                .collect(),
            tag_ids: vec![],
        }
    }

    #[test]
    fn lists_incomplete_outfits() {
        let outfits = vec![outfit(1, Rating::Mid, Some(1), &[(1, ItemType::Top), (2, ItemType::Bottom)])];
        let page = select_listing(outfits, &HashSet::new(), &ListingQuery::default());
        assert_eq!(page.items.len(), 1);
        assert!(page.last_page);
    }

    #[test]
    fn still_excludes_unavailable_items() {
        let outfits = vec![
            outfit(1, Rating::Mid, Some(1), &[(1, ItemType::Top)]),
            outfit(2, Rating::Mid, Some(2), &[(2, ItemType::Top)]),
        ];
        let unavailable: HashSet<DbId> = [1].into_iter().collect();
        let page = select_listing(outfits, &unavailable, &ListingQuery::default());
        assert_eq!(page.items.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn orders_newest_first_with_ghosts_last() {
        let outfits = vec![
            outfit(1, Rating::Miss, None, &[]),
            outfit(2, Rating::Mid, Some(3), &[]),
            outfit(3, Rating::Hit, Some(9), &[]),
        ];
        let page = select_listing(outfits, &HashSet::new(), &ListingQuery::default());
        assert_eq!(page.items.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn respects_min_rating_and_tag() {
        let outfits = vec![
            outfit(1, Rating::Miss, None, &[]),
            outfit(2, Rating::Mid, None, &[]),
            outfit(3, Rating::Mid, Some(4), &[]),
        ];
        let query = ListingQuery {
            tag_filter: Some(TagFilter::Virtual(VirtualTag::Idea)),
            min_rating: Rating::Mid,
            ..ListingQuery::default()
        };
        let page = select_listing(outfits, &HashSet::new(), &query);
        assert_eq!(page.items.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn view_includes_virtual_tags_flattened() {
        let view = OutfitView::from(outfit(7, Rating::Hit, None, &[]));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["rating"], 2);
        assert_eq!(json["wearDate"], serde_json::Value::Null);
        assert_eq!(json["virtualTags"], serde_json::json!(["idea", "hit"]));
    }
}

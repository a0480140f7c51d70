//! Eligibility gates applied before scoring.
//!
//! Order: minimum rating (normally already applied at fetch time), then
//! availability, then (suggestions only) completeness and the tag filter.

use std::collections::HashSet;

use crate::outfit::{ItemType, OutfitRecord, Rating};
use crate::types::DbId;
use crate::virtual_tags::TagFilter;

// ---------------------------------------------------------------------------
// Diagnostic codes
// ---------------------------------------------------------------------------

/// Rating or availability removed every candidate.
pub const FILTER_NO_ELIGIBLE: &str = "no_eligible_outfits_or_all_contain_unavailable_items";

/// Candidates were restricted to complete outfits (and the tag, if any).
pub const FILTER_COMPLETE_ONLY: &str = "complete_outfits_only";

/// General listing: availability (and tag, if any) only.
pub const FILTER_AVAILABLE_ONLY: &str = "available_items_only";

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// True if any item of the outfit is withheld or retired.
pub fn contains_unavailable(outfit: &OutfitRecord, unavailable: &HashSet<DbId>) -> bool {
    outfit.item_ids().any(|id| unavailable.contains(&id))
}

/// Keep outfits rated at least `min_rating` whose items are all available.
pub fn availability_gate(
    outfits: Vec<OutfitRecord>,
    unavailable: &HashSet<DbId>,
    min_rating: Rating,
) -> Vec<OutfitRecord> {
    outfits
        .into_iter()
        .filter(|o| o.rating >= min_rating)
        .filter(|o| !contains_unavailable(o, unavailable))
        .collect()
}

/// An outfit is complete with a top or layer, a bottom and footwear.
///
/// Outfits with no items at all are exempt and count as complete.
pub fn is_complete(outfit: &OutfitRecord) -> bool {
    if outfit.items.is_empty() {
        return true;
    }
    let has = |wanted: &[ItemType]| outfit.items.iter().any(|i| wanted.contains(&i.item_type));
    has(&[ItemType::Top, ItemType::Layer]) && has(&[ItemType::Bottom]) && has(&[ItemType::Footwear])
}

/// Suggestion-only gate: completeness plus the optional tag filter.
pub fn completeness_gate(
    outfits: Vec<OutfitRecord>,
    tag_filter: Option<&TagFilter>,
) -> Vec<OutfitRecord> {
    outfits
        .into_iter()
        .filter(is_complete)
        .filter(|o| tag_filter.map_or(true, |f| f.matches(o)))
        .collect()
}

/// Listing gate: only the optional tag filter, no completeness requirement.
pub fn tag_gate(outfits: Vec<OutfitRecord>, tag_filter: Option<&TagFilter>) -> Vec<OutfitRecord> {
    match tag_filter {
        Some(filter) => outfits.into_iter().filter(|o| filter.matches(o)).collect(),
        None => outfits,
    }
}

//! Outfit suggestion engine.
//!
//! Pure pipeline over a materialized [`WardrobeInputs`] snapshot:
//!
//! ```text
//! snapshot -> thresholds -> freshness map
//! outfits -> availability gate -> completeness/tag gate -> dedup -> score -> rank -> page
//! ```
//!
//! The current time is always passed in; nothing here reads a clock or
//! caches across calls.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::dedup::deduplicate;
use crate::eligibility::{
    availability_gate, completeness_gate, FILTER_COMPLETE_ONLY, FILTER_NO_ELIGIBLE,
};
use crate::freshness::build_freshness_map;
use crate::listing::OutfitView;
use crate::outfit::{OutfitRecord, Rating, WardrobeItem};
use crate::ranking::{paginate, rank, Page, PageRequest};
use crate::scoring::{score_outfit, ScoredOutfit, ScoringDetails};
use crate::types::{DbId, Timestamp, WearDate};
use crate::virtual_tags::TagFilter;
use crate::wardrobe::{RecencyThresholds, WardrobeSnapshot};

pub const ALGORITHM_VERSION: &str = "v2";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything the engine needs for one user, already fetched.
#[derive(Debug, Clone, Default)]
pub struct WardrobeInputs {
    pub available_items: Vec<WardrobeItem>,
    pub unavailable_item_ids: HashSet<DbId>,
    pub last_worn: HashMap<DbId, WearDate>,
    pub outfits: Vec<OutfitRecord>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionQuery {
    pub page: PageRequest,
    pub tag_filter: Option<TagFilter>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionMetadata {
    pub wardrobe_size: usize,
    pub recency_threshold: RecencyThresholds,
    pub last_page: bool,
    pub algorithm_version: &'static str,
    pub filter_applied: &'static str,
    #[serde(rename = "tagId", skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
}

/// Ranked page before outfit records are hydrated.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub page: Page<ScoredOutfit>,
    pub metadata: SuggestionMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(flatten)]
    pub outfit: OutfitView,
    pub scoring_details: ScoringDetails,
    pub total_score: i32,
}

impl Suggestion {
    /// Pair a scored outfit with its (possibly freshly loaded) full record.
    pub fn new(record: OutfitRecord, scored: ScoredOutfit) -> Self {
        Self {
            outfit: OutfitView::from(record),
            scoring_details: scored.details,
            total_score: scored.total_score,
        }
    }
}

impl From<ScoredOutfit> for Suggestion {
    fn from(scored: ScoredOutfit) -> Self {
        let record = scored.outfit.clone();
        Self::new(record, scored)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
    pub generated_at: Timestamp,
    pub metadata: SuggestionMetadata,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Run the full suggestion pipeline. Never fails: empty outcomes are pages
/// with an explanatory `filter_applied` code.
pub fn run(inputs: WardrobeInputs, query: &SuggestionQuery, now: Timestamp) -> EngineOutput {
    let WardrobeInputs {
        available_items,
        unavailable_item_ids,
        last_worn,
        outfits,
    } = inputs;

    let snapshot = WardrobeSnapshot::build(&available_items);
    let thresholds = RecencyThresholds::from_snapshot(&snapshot);
    let freshness = build_freshness_map(&available_items, &last_worn, &thresholds, now);

    let metadata = |last_page: bool, filter_applied: &'static str| SuggestionMetadata {
        wardrobe_size: snapshot.total,
        recency_threshold: thresholds,
        last_page,
        algorithm_version: ALGORITHM_VERSION,
        filter_applied,
        tag_id: query.tag_filter.map(|f| f.id_string()),
    };
    let empty = |filter_applied| EngineOutput {
        page: Page {
            items: Vec::new(),
            last_page: true,
        },
        metadata: metadata(true, filter_applied),
    };

    let candidates = outfits.len();
    let eligible = availability_gate(outfits, &unavailable_item_ids, Rating::MIN_SUGGESTION);
    if eligible.is_empty() {
        tracing::debug!(candidates, "No eligible outfits after rating/availability gate");
        return empty(FILTER_NO_ELIGIBLE);
    }

    let eligible_count = eligible.len();
    let complete = completeness_gate(eligible, query.tag_filter.as_ref());
    if complete.is_empty() {
        tracing::debug!(
            candidates,
            eligible = eligible_count,
            "No complete outfits left after completeness gate",
        );
        return empty(FILTER_COMPLETE_ONLY);
    }

    let complete_count = complete.len();
    let mut scored: Vec<ScoredOutfit> = deduplicate(complete)
        .into_iter()
        .map(|d| score_outfit(d, &freshness, now))
        .collect();
    rank(&mut scored);

    let ranked = scored.len();
    let page = paginate(scored, query.page);

    tracing::debug!(
        candidates,
        eligible = eligible_count,
        complete = complete_count,
        ranked,
        returned = page.items.len(),
        last_page = page.last_page,
        "Suggestion pipeline finished",
    );

    EngineOutput {
        metadata: metadata(page.last_page, FILTER_COMPLETE_ONLY),
        page,
    }
}

/// Run the engine and build the response from the outfit records it was given.
pub fn suggest(inputs: WardrobeInputs, query: &SuggestionQuery, now: Timestamp) -> SuggestionResponse {
    let output = run(inputs, query, now);
    SuggestionResponse {
        suggestions: output.page.items.into_iter().map(Suggestion::from).collect(),
        generated_at: now,
        metadata: output.metadata,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

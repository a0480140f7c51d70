//! Outfit scoring.
//!
//! `total = rating + time + frequency`, where:
//!
//! - rating: 10 for a hit, 3 otherwise
//! - time: `round(40 * (0.6 * avg + 0.4 * min^1.5))` over item freshness, so
//!   one just-worn item drags the whole outfit down
//! - frequency: 10, 7, 4, 2 for looks worn 1..=4 times, 0 beyond

use serde::Serialize;

use crate::dedup::DedupedOutfit;
use crate::freshness::{self, FreshnessMap};
use crate::outfit::{OutfitRecord, Rating};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const RATING_SCORE_HIT: i32 = 10;
pub const RATING_SCORE_OTHER: i32 = 3;

/// Maximum time score (freshness 1.0).
pub const TIME_SCORE_SCALE: f64 = 40.0;

pub const AVG_FRESHNESS_WEIGHT: f64 = 0.6;
pub const MIN_FRESHNESS_WEIGHT: f64 = 0.4;
pub const MIN_FRESHNESS_EXPONENT: f64 = 1.5;

/// Frequency score by wear count, starting at a wear count of 1.
pub const FREQUENCY_SCORES: &[i32] = &[10, 7, 4, 2];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Diagnostic inputs behind a score, for client display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoringData {
    pub days_since_worn: Option<i64>,
    pub wear_count: usize,
    pub item_count: usize,
    pub avg_freshness: Option<f64>,
    pub min_freshness: Option<f64>,
    pub final_freshness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringDetails {
    pub rating_score: i32,
    pub time_score: i32,
    pub frequency_score: i32,
    pub raw_data: RawScoringData,
}

#[derive(Debug, Clone)]
pub struct ScoredOutfit {
    pub outfit: OutfitRecord,
    pub core_key: String,
    pub details: ScoringDetails,
    pub total_score: i32,
}

/// Aggregate freshness of an outfit's items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreshnessStats {
    pub avg: f64,
    pub min: f64,
    pub combined: f64,
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

pub fn rating_score(rating: Rating) -> i32 {
    match rating {
        Rating::Hit => RATING_SCORE_HIT,
        Rating::Mid | Rating::Miss => RATING_SCORE_OTHER,
    }
}

pub fn frequency_score(wear_count: usize) -> i32 {
    wear_count
        .checked_sub(1)
        .and_then(|idx| FREQUENCY_SCORES.get(idx))
        .copied()
        .unwrap_or(0)
}

/// Freshness stats over all items, accessories included. `None` without items.
pub fn freshness_stats(outfit: &OutfitRecord, map: &FreshnessMap) -> Option<FreshnessStats> {
    if outfit.items.is_empty() {
        return None;
    }

    let values: Vec<f64> = outfit
        .item_ids()
        .map(|id| freshness::lookup(map, id))
        .collect();
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let combined =
        AVG_FRESHNESS_WEIGHT * avg + MIN_FRESHNESS_WEIGHT * min.powf(MIN_FRESHNESS_EXPONENT);

    Some(FreshnessStats { avg, min, combined })
}

pub fn time_score(combined_freshness: f64) -> i32 {
    (combined_freshness * TIME_SCORE_SCALE).round() as i32
}

// ---------------------------------------------------------------------------
// Outfit scoring
// ---------------------------------------------------------------------------

/// Score one deduplicated outfit. Item-less outfits score on rating alone.
pub fn score_outfit(deduped: DedupedOutfit, map: &FreshnessMap, now: Timestamp) -> ScoredOutfit {
    let DedupedOutfit {
        outfit,
        core_key,
        wear_count,
    } = deduped;

    let rating = rating_score(outfit.rating);
    let stats = freshness_stats(&outfit, map);
    let (time, frequency) = match stats {
        Some(s) => (time_score(s.combined), frequency_score(wear_count)),
        None => (0, 0),
    };

    let details = ScoringDetails {
        rating_score: rating,
        time_score: time,
        frequency_score: frequency,
        raw_data: RawScoringData {
            days_since_worn: outfit.wear_date.map(|d| freshness::days_since(d, now)),
            wear_count,
            item_count: outfit.items.len(),
            avg_freshness: stats.map(|s| s.avg),
            min_freshness: stats.map(|s| s.min),
            final_freshness: stats.map(|s| s.combined),
        },
    };

    ScoredOutfit {
        outfit,
        core_key,
        total_score: rating + time + frequency,
        details,
    }
}

//! Item freshness curve.
//!
//! Freshness is a desirability score in `[0.01, 1.0]` for wearing an item
//! again, driven by days since it was last worn relative to the recency
//! threshold `T` of its type:
//!
//! ```text
//! d <= 0          0.01                          just worn
//! 0 < d < T       normalized logistic rise      stays low until ~0.7 T
//! T <= d < 2T     1.0                           plateau
//! d >= 2T         1.0 - 0.05 (d - 2T), >= 0.01  slow degradation
//! ```
//!
//! Never-worn items are fully fresh. The map is rebuilt per request because
//! it depends on the injected `now`.

use std::collections::HashMap;

use crate::outfit::WardrobeItem;
use crate::types::{DbId, Timestamp, WearDate};
use crate::wardrobe::{RecencyThresholds, DEFAULT_THRESHOLD_DAYS};

// ---------------------------------------------------------------------------
// Curve constants
// ---------------------------------------------------------------------------

pub const MIN_FRESHNESS: f64 = 0.01;
pub const MAX_FRESHNESS: f64 = 1.0;

/// Logistic steepness `k` of the rise phase.
pub const RISE_STEEPNESS: f64 = 7.0;

/// Logistic midpoint `m`, as a fraction of the threshold.
pub const RISE_MIDPOINT: f64 = 0.7;

/// Linear loss per day once past `2T`.
pub const DECAY_PER_DAY: f64 = 0.05;

/// Item id -> freshness.
pub type FreshnessMap = HashMap<DbId, f64>;

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-RISE_STEEPNESS * (x - RISE_MIDPOINT)).exp())
}

/// Rise-phase value for `progress = d / T` in `(0, 1)`, normalized so that
/// progress 0 maps to the minimum and progress 1 to the maximum.
fn rise(progress: f64) -> f64 {
    let low = logistic(0.0);
    let high = logistic(1.0);
    let normalized = (logistic(progress) - low) / (high - low);
    MIN_FRESHNESS + (MAX_FRESHNESS - MIN_FRESHNESS) * normalized
}

/// Freshness of an item last worn `days_since_worn` days ago.
///
/// A non-positive or non-finite `threshold` falls back to the default.
pub fn freshness_for_days(days_since_worn: i64, threshold: f64) -> f64 {
    let threshold = if threshold.is_finite() && threshold > 0.0 {
        threshold
    } else {
        DEFAULT_THRESHOLD_DAYS
    };
    let days = days_since_worn as f64;

    let value = if days <= 0.0 {
        MIN_FRESHNESS
    } else if days < threshold {
        rise(days / threshold)
    } else if days < 2.0 * threshold {
        MAX_FRESHNESS
    } else {
        MAX_FRESHNESS - DECAY_PER_DAY * (days - 2.0 * threshold)
    };

    value.clamp(MIN_FRESHNESS, MAX_FRESHNESS)
}

/// Whole days between `date` and the calendar day of `now`. Negative for
/// dates in the future.
pub fn days_since(date: WearDate, now: Timestamp) -> i64 {
    (now.date_naive() - date).num_days()
}

/// Freshness for an optional last-worn date. Never worn means fully fresh.
pub fn item_freshness(last_worn: Option<WearDate>, threshold: f64, now: Timestamp) -> f64 {
    match last_worn {
        Some(date) => freshness_for_days(days_since(date, now), threshold),
        None => MAX_FRESHNESS,
    }
}

/// Build the freshness map for all available items.
pub fn build_freshness_map(
    items: &[WardrobeItem],
    last_worn: &HashMap<DbId, WearDate>,
    thresholds: &RecencyThresholds,
    now: Timestamp,
) -> FreshnessMap {
    items
        .iter()
        .map(|item| {
            let threshold = thresholds.for_type(item.item_type);
            let value = item_freshness(last_worn.get(&item.id).copied(), threshold, now);
            (item.id, value)
        })
        .collect()
}

/// Look up an item's freshness; items missing from the map count as fresh.
pub fn lookup(map: &FreshnessMap, item_id: DbId) -> f64 {
    map.get(&item_id).copied().unwrap_or(MAX_FRESHNESS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

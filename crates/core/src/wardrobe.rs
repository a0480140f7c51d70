//! Wardrobe snapshot and per-type recency thresholds.
//!
//! The snapshot counts what the user can currently wear. Larger categories
//! rotate more slowly, so their items need more days to recover freshness.

use serde::Serialize;

use crate::outfit::{ItemType, WardrobeItem};

// ---------------------------------------------------------------------------
// Threshold constants
// ---------------------------------------------------------------------------

/// Days of recovery per available item of a type.
pub const THRESHOLD_DAYS_PER_ITEM: f64 = 0.75;

/// No category recovers faster than this.
pub const MIN_THRESHOLD_DAYS: f64 = 3.0;

/// Used for empty categories and unrecognized item types.
pub const DEFAULT_THRESHOLD_DAYS: f64 = 7.0;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Available-item counts per type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WardrobeSnapshot {
    pub layer: usize,
    pub top: usize,
    pub bottom: usize,
    pub footwear: usize,
    pub accessory: usize,
    pub other: usize,
    pub total: usize,
}

impl WardrobeSnapshot {
    /// Count the given available items by type. An empty slice yields all zeros.
    pub fn build(items: &[WardrobeItem]) -> Self {
        let mut snapshot = Self::default();
        for item in items {
            match item.item_type {
                ItemType::Layer => snapshot.layer += 1,
                ItemType::Top => snapshot.top += 1,
                ItemType::Bottom => snapshot.bottom += 1,
                ItemType::Footwear => snapshot.footwear += 1,
                ItemType::Accessory => snapshot.accessory += 1,
                ItemType::Unknown => snapshot.other += 1,
            }
        }
        snapshot.total = items.len();
        snapshot
    }

    pub fn count(&self, item_type: ItemType) -> usize {
        match item_type {
            ItemType::Layer => self.layer,
            ItemType::Top => self.top,
            ItemType::Bottom => self.bottom,
            ItemType::Footwear => self.footwear,
            ItemType::Accessory => self.accessory,
            ItemType::Unknown => self.other,
        }
    }
}

// ---------------------------------------------------------------------------
// Recency thresholds
// ---------------------------------------------------------------------------

/// Days after which an item of each type has fully recovered freshness.
///
/// Serialized as-is into the `recency_threshold` response metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecencyThresholds {
    pub layer: f64,
    pub top: f64,
    pub bottom: f64,
    pub footwear: f64,
    pub accessory: f64,
    pub default: f64,
}

impl Default for RecencyThresholds {
    fn default() -> Self {
        Self {
            layer: DEFAULT_THRESHOLD_DAYS,
            top: DEFAULT_THRESHOLD_DAYS,
            bottom: DEFAULT_THRESHOLD_DAYS,
            footwear: DEFAULT_THRESHOLD_DAYS,
            accessory: DEFAULT_THRESHOLD_DAYS,
            default: DEFAULT_THRESHOLD_DAYS,
        }
    }
}

impl RecencyThresholds {
    pub fn from_snapshot(snapshot: &WardrobeSnapshot) -> Self {
        Self {
            layer: threshold_for_count(snapshot.layer),
            top: threshold_for_count(snapshot.top),
            bottom: threshold_for_count(snapshot.bottom),
            footwear: threshold_for_count(snapshot.footwear),
            accessory: threshold_for_count(snapshot.accessory),
            default: DEFAULT_THRESHOLD_DAYS,
        }
    }

    pub fn for_type(&self, item_type: ItemType) -> f64 {
        match item_type {
            ItemType::Layer => self.layer,
            ItemType::Top => self.top,
            ItemType::Bottom => self.bottom,
            ItemType::Footwear => self.footwear,
            ItemType::Accessory => self.accessory,
            ItemType::Unknown => self.default,
        }
    }
}

/// `max(count * 0.75, 3)` for a non-empty category, otherwise the default.
pub fn threshold_for_count(count: usize) -> f64 {
    let raw = if count > 0 {
        count as f64 * THRESHOLD_DAYS_PER_ITEM
    } else {
        DEFAULT_THRESHOLD_DAYS
    };
    raw.max(MIN_THRESHOLD_DAYS)
}

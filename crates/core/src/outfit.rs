//! Item and outfit value types shared by every engine stage.
//!
//! These are read-only snapshots: the engine never mutates an item or outfit,
//! it only derives transient structures from them.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, WearDate};

// ---------------------------------------------------------------------------
// Item type
// ---------------------------------------------------------------------------

pub const ITEM_TYPE_LAYER: &str = "layer";
pub const ITEM_TYPE_TOP: &str = "top";
pub const ITEM_TYPE_BOTTOM: &str = "bottom";
pub const ITEM_TYPE_FOOTWEAR: &str = "footwear";
pub const ITEM_TYPE_ACCESSORY: &str = "accessory";

/// Clothing category of an item.
///
/// Stored values outside the known set deserialize to [`ItemType::Unknown`],
/// which falls back to the default recency threshold and never counts as a
/// core or completing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Layer,
    Top,
    Bottom,
    Footwear,
    Accessory,
    #[serde(other)]
    Unknown,
}

impl ItemType {
    /// The five recognized categories, in display order.
    pub const KNOWN: [ItemType; 5] = [
        ItemType::Layer,
        ItemType::Top,
        ItemType::Bottom,
        ItemType::Footwear,
        ItemType::Accessory,
    ];

    /// Convert from a database string value. Unrecognized values map to `Unknown`.
    pub fn from_str_value(s: &str) -> Self {
        match s {
            ITEM_TYPE_LAYER => Self::Layer,
            ITEM_TYPE_TOP => Self::Top,
            ITEM_TYPE_BOTTOM => Self::Bottom,
            ITEM_TYPE_FOOTWEAR => Self::Footwear,
            ITEM_TYPE_ACCESSORY => Self::Accessory,
            _ => Self::Unknown,
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layer => ITEM_TYPE_LAYER,
            Self::Top => ITEM_TYPE_TOP,
            Self::Bottom => ITEM_TYPE_BOTTOM,
            Self::Footwear => ITEM_TYPE_FOOTWEAR,
            Self::Accessory => ITEM_TYPE_ACCESSORY,
            Self::Unknown => "unknown",
        }
    }

    /// Layer, top and bottom define "the same look"; footwear and accessories don't.
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Layer | Self::Top | Self::Bottom)
    }
}

// ---------------------------------------------------------------------------
// Item status
// ---------------------------------------------------------------------------

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_WITHHELD: &str = "withheld";
pub const STATUS_RETIRED: &str = "retired";
pub const VALID_STATUSES: &[&str] = &[STATUS_AVAILABLE, STATUS_WITHHELD, STATUS_RETIRED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Withheld,
    Retired,
}

impl ItemStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_AVAILABLE => Ok(Self::Available),
            STATUS_WITHHELD => Ok(Self::Withheld),
            STATUS_RETIRED => Ok(Self::Retired),
            _ => Err(format!(
                "Invalid item status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => STATUS_AVAILABLE,
            Self::Withheld => STATUS_WITHHELD,
            Self::Retired => STATUS_RETIRED,
        }
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// How an outfit went when it was worn. Serialized as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum Rating {
    Miss = 0,
    Mid = 1,
    Hit = 2,
}

impl Rating {
    /// Baseline gate applied at fetch time: misses are never suggested.
    pub const MIN_SUGGESTION: Rating = Rating::Mid;

    pub fn value(self) -> i16 {
        self as i16
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl TryFrom<i16> for Rating {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Miss),
            1 => Ok(Self::Mid),
            2 => Ok(Self::Hit),
            other => Err(format!("Invalid rating {other}. Must be 0, 1 or 2")),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An item as seen by the wardrobe snapshot: identity and category only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: DbId,
    pub item_type: ItemType,
}

/// One `(item, type)` membership of an outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitItem {
    pub item_id: DbId,
    pub item_type: ItemType,
}

/// A logged (or planned) outfit.
///
/// `wear_date == None` marks a ghost/idea outfit that was never worn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecord {
    pub id: DbId,
    pub name: Option<String>,
    pub rating: Rating,
    pub wear_date: Option<WearDate>,
    pub items: Vec<OutfitItem>,
    pub tag_ids: Vec<DbId>,
}

impl OutfitRecord {
    pub fn is_ghost(&self) -> bool {
        self.wear_date.is_none()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = DbId> + '_ {
        self.items.iter().map(|i| i.item_id)
    }
}

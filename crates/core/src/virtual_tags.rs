//! Virtual tags: system-computed tags with no stored row.
//!
//! Each virtual tag is a fixed id plus a predicate over outfit fields. A
//! caller-supplied tag id is resolved against this registry first and only
//! then treated as a stored tag id.

use serde::Serialize;

use crate::error::CoreError;
use crate::outfit::{OutfitRecord, Rating};
use crate::types::DbId;

pub const VIRTUAL_TAG_IDEA: &str = "idea";
pub const VIRTUAL_TAG_HIT: &str = "hit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualTag {
    /// Planned outfit that was never worn.
    Idea,
    /// Outfit rated a hit.
    Hit,
}

/// Every virtual tag, in display order.
pub const VIRTUAL_TAGS: &[VirtualTag] = &[VirtualTag::Idea, VirtualTag::Hit];

impl VirtualTag {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Idea => VIRTUAL_TAG_IDEA,
            Self::Hit => VIRTUAL_TAG_HIT,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Hit => "Hit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        VIRTUAL_TAGS.iter().copied().find(|tag| tag.id() == id)
    }

    pub fn matches(&self, outfit: &OutfitRecord) -> bool {
        match self {
            Self::Idea => outfit.wear_date.is_none(),
            Self::Hit => outfit.rating == Rating::Hit,
        }
    }
}

/// Ids of every virtual tag the outfit carries.
pub fn virtual_tags_for(outfit: &OutfitRecord) -> Vec<&'static str> {
    VIRTUAL_TAGS
        .iter()
        .filter(|tag| tag.matches(outfit))
        .map(|tag| tag.id())
        .collect()
}

// ---------------------------------------------------------------------------
// Tag filter
// ---------------------------------------------------------------------------

/// A requested tag restriction, real or virtual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    Virtual(VirtualTag),
    Stored(DbId),
}

impl TagFilter {
    /// Resolve a caller-supplied tag id: registry first, then a positive
    /// stored tag id.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if let Some(tag) = VirtualTag::from_id(raw) {
            return Ok(Self::Virtual(tag));
        }
        match raw.parse::<DbId>() {
            Ok(id) if id > 0 => Ok(Self::Stored(id)),
            _ => Err(CoreError::Validation(format!(
                "Unknown tag id '{raw}'. Must be a stored tag id or one of: {}",
                VIRTUAL_TAGS
                    .iter()
                    .map(|t| t.id())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    pub fn matches(&self, outfit: &OutfitRecord) -> bool {
        match self {
            Self::Virtual(tag) => tag.matches(outfit),
            Self::Stored(id) => outfit.tag_ids.contains(id),
        }
    }

    /// The id as echoed back in response metadata.
    pub fn id_string(&self) -> String {
        match self {
            Self::Virtual(tag) => tag.id().to_string(),
            Self::Stored(id) => id.to_string(),
        }
    }
}

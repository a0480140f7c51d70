//! Item rows.

use serde::Serialize;
use sqlx::FromRow;
use wardrobe_core::outfit::{ItemType, WardrobeItem};
use wardrobe_core::types::{DbId, WearDate};

/// Id and type of an item; the columns the wardrobe snapshot needs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemTypeRow {
    pub id: DbId,
    pub item_type: String,
}

impl From<ItemTypeRow> for WardrobeItem {
    fn from(row: ItemTypeRow) -> Self {
        Self {
            id: row.id,
            item_type: ItemType::from_str_value(&row.item_type),
        }
    }
}

/// Latest wear date of one item across dated outfits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LastWornRow {
    pub item_id: DbId,
    pub last_worn: WearDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_string_maps_to_unknown() {
        let item: WardrobeItem = ItemTypeRow {
            id: 4,
            item_type: "cape".to_string(),
        }
        .into();
        assert_eq!(item.item_type, ItemType::Unknown);

        let item: WardrobeItem = ItemTypeRow {
            id: 5,
            item_type: "footwear".to_string(),
        }
        .into();
        assert_eq!(item.item_type, ItemType::Footwear);
    }
}

//! Outfit rows and assembly into [`OutfitRecord`]s.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;
use wardrobe_core::outfit::{ItemType, OutfitItem, OutfitRecord, Rating};
use wardrobe_core::types::{DbId, WearDate};

/// A row from the `outfits` table (user and audit columns omitted).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutfitRow {
    pub id: DbId,
    pub name: Option<String>,
    pub rating: i16,
    pub wear_date: Option<WearDate>,
}

/// One `outfit_items` membership joined with the item's type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutfitItemRow {
    pub outfit_id: DbId,
    pub item_id: DbId,
    pub item_type: String,
}

/// A row from the `outfit_tags` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutfitTagRow {
    pub outfit_id: DbId,
    pub tag_id: DbId,
}

/// Stitch outfit, membership and tag rows into records, keeping the order
/// of `outfits`.
///
/// Membership rows are expected in display order. Outfits with an
/// out-of-range rating are skipped with a warning.
pub fn assemble_outfits(
    outfits: Vec<OutfitRow>,
    items: Vec<OutfitItemRow>,
    tags: Vec<OutfitTagRow>,
) -> Vec<OutfitRecord> {
    let mut items_by_outfit: HashMap<DbId, Vec<OutfitItem>> = HashMap::new();
    for row in items {
        items_by_outfit.entry(row.outfit_id).or_default().push(OutfitItem {
            item_id: row.item_id,
            item_type: ItemType::from_str_value(&row.item_type),
        });
    }

    let mut tags_by_outfit: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for row in tags {
        tags_by_outfit.entry(row.outfit_id).or_default().push(row.tag_id);
    }

    outfits
        .into_iter()
        .filter_map(|row| {
            let rating = match Rating::try_from(row.rating) {
                Ok(rating) => rating,
                Err(e) => {
                    tracing::warn!(outfit_id = row.id, error = %e, "Skipping outfit with invalid rating");
                    return None;
                }
            };
            Some(OutfitRecord {
                id: row.id,
                name: row.name,
                rating,
                wear_date: row.wear_date,
                items: items_by_outfit.remove(&row.id).unwrap_or_default(),
                tag_ids: tags_by_outfit.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

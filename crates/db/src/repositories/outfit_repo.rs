//! Repository for the `outfits`, `outfit_items` and `outfit_tags` tables.

use sqlx::PgPool;
use wardrobe_core::types::DbId;

use crate::models::outfit::{OutfitItemRow, OutfitRow, OutfitTagRow};

/// Column list for `outfits` queries.
const OUTFIT_COLUMNS: &str = "id, name, rating, wear_date";

/// Read queries over a user's outfits.
pub struct OutfitRepo;

impl OutfitRepo {
    /// Outfits rated at least `min_rating`, newest first with idea outfits last.
    pub async fn list_by_min_rating(
        pool: &PgPool,
        user_id: DbId,
        min_rating: i16,
    ) -> Result<Vec<OutfitRow>, sqlx::Error> {
        let query = format!(
            "SELECT {OUTFIT_COLUMNS} FROM outfits \
             WHERE user_id = $1 AND rating >= $2 \
             ORDER BY wear_date DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, OutfitRow>(&query)
            .bind(user_id)
            .bind(min_rating)
            .fetch_all(pool)
            .await
    }

    /// Outfits with the given ids, scoped to the user.
    pub async fn list_by_ids(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<OutfitRow>, sqlx::Error> {
        let query = format!(
            "SELECT {OUTFIT_COLUMNS} FROM outfits \
             WHERE user_id = $1 AND id = ANY($2)"
        );
        sqlx::query_as::<_, OutfitRow>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Item memberships (with item type) for the given outfits, in display order.
    pub async fn items_for_outfits(
        pool: &PgPool,
        outfit_ids: &[DbId],
    ) -> Result<Vec<OutfitItemRow>, sqlx::Error> {
        sqlx::query_as::<_, OutfitItemRow>(
            "SELECT oi.outfit_id, oi.item_id, i.item_type \
             FROM outfit_items oi \
             JOIN items i ON i.id = oi.item_id \
             WHERE oi.outfit_id = ANY($1) \
             ORDER BY oi.outfit_id, oi.position, oi.item_id",
        )
        .bind(outfit_ids)
        .fetch_all(pool)
        .await
    }

    /// Stored tag associations for the given outfits.
    pub async fn tags_for_outfits(
        pool: &PgPool,
        outfit_ids: &[DbId],
    ) -> Result<Vec<OutfitTagRow>, sqlx::Error> {
        sqlx::query_as::<_, OutfitTagRow>(
            "SELECT outfit_id, tag_id FROM outfit_tags \
             WHERE outfit_id = ANY($1) \
             ORDER BY outfit_id, tag_id",
        )
        .bind(outfit_ids)
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `items` table.

use sqlx::PgPool;
use wardrobe_core::outfit::STATUS_AVAILABLE;
use wardrobe_core::types::DbId;

use crate::models::item::{ItemTypeRow, LastWornRow};

/// Read queries over a user's items.
pub struct ItemRepo;

impl ItemRepo {
    /// Id and type of every available item the user owns.
    pub async fn list_available(pool: &PgPool, user_id: DbId) -> Result<Vec<ItemTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, ItemTypeRow>(
            "SELECT id, item_type FROM items \
             WHERE user_id = $1 AND status = $2 \
             ORDER BY id",
        )
        .bind(user_id)
        .bind(STATUS_AVAILABLE)
        .fetch_all(pool)
        .await
    }

    /// Ids of every withheld or retired item the user owns.
    pub async fn list_unavailable_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM items \
             WHERE user_id = $1 AND status <> $2 \
             ORDER BY id",
        )
        .bind(user_id)
        .bind(STATUS_AVAILABLE)
        .fetch_all(pool)
        .await
    }

    /// Latest wear date per item over the user's dated outfits.
    ///
    /// Items that only appear in idea outfits (no wear date) are absent.
    pub async fn last_worn_dates(pool: &PgPool, user_id: DbId) -> Result<Vec<LastWornRow>, sqlx::Error> {
        sqlx::query_as::<_, LastWornRow>(
            "SELECT oi.item_id, MAX(o.wear_date) AS last_worn \
             FROM outfit_items oi \
             JOIN outfits o ON o.id = oi.outfit_id \
             WHERE o.user_id = $1 AND o.wear_date IS NOT NULL \
             GROUP BY oi.item_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

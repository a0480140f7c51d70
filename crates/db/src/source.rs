//! PostgreSQL-backed [`WardrobeSource`].

use std::collections::HashMap;

use async_trait::async_trait;
use wardrobe_core::error::CoreError;
use wardrobe_core::outfit::{OutfitRecord, Rating, WardrobeItem};
use wardrobe_core::source::WardrobeSource;
use wardrobe_core::types::{DbId, WearDate};

use crate::models::outfit::{assemble_outfits, OutfitRow};
use crate::repositories::{ItemRepo, OutfitRepo};
use crate::DbPool;

/// Serves the suggestion engine's reads from the wardrobe tables.
#[derive(Clone)]
pub struct PgWardrobeSource {
    pool: DbPool,
}

impl PgWardrobeSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Load memberships and tags for `rows` and assemble full records.
    async fn hydrate(&self, rows: Vec<OutfitRow>) -> Result<Vec<OutfitRecord>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let (items, tags) = tokio::try_join!(
            OutfitRepo::items_for_outfits(&self.pool, &ids),
            OutfitRepo::tags_for_outfits(&self.pool, &ids),
        )?;
        Ok(assemble_outfits(rows, items, tags))
    }
}

fn storage_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(operation, error = %err, "Wardrobe query failed");
        CoreError::Internal(format!("{operation} failed: {err}"))
    }
}

#[async_trait]
impl WardrobeSource for PgWardrobeSource {
    async fn list_available_items(&self, user_id: DbId) -> Result<Vec<WardrobeItem>, CoreError> {
        let rows = ItemRepo::list_available(&self.pool, user_id)
            .await
            .map_err(storage_error("list_available_items"))?;
        Ok(rows.into_iter().map(WardrobeItem::from).collect())
    }

    async fn list_unavailable_items(&self, user_id: DbId) -> Result<Vec<DbId>, CoreError> {
        ItemRepo::list_unavailable_ids(&self.pool, user_id)
            .await
            .map_err(storage_error("list_unavailable_items"))
    }

    async fn last_worn_dates_by_item(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, WearDate>, CoreError> {
        let rows = ItemRepo::last_worn_dates(&self.pool, user_id)
            .await
            .map_err(storage_error("last_worn_dates_by_item"))?;
        Ok(rows.into_iter().map(|r| (r.item_id, r.last_worn)).collect())
    }

    async fn list_eligible_outfits(
        &self,
        user_id: DbId,
        min_rating: Rating,
    ) -> Result<Vec<OutfitRecord>, CoreError> {
        let rows = OutfitRepo::list_by_min_rating(&self.pool, user_id, min_rating.value())
            .await
            .map_err(storage_error("list_eligible_outfits"))?;
        self.hydrate(rows)
            .await
            .map_err(storage_error("list_eligible_outfits"))
    }

    async fn load_outfits_by_ids(
        &self,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<OutfitRecord>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = OutfitRepo::list_by_ids(&self.pool, user_id, ids)
            .await
            .map_err(storage_error("load_outfits_by_ids"))?;
        self.hydrate(rows)
            .await
            .map_err(storage_error("load_outfits_by_ids"))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(storage_error("ping"))
    }
}

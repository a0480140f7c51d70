//! Data-access seam for the suggestion and listing services.
//!
//! The engine consumes materialized snapshots only; implementations of
//! [`WardrobeSource`] do the fetching. `wardrobe-db` provides the PostgreSQL
//! implementation, and [`InMemoryWardrobe`] backs tests and local fixtures.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::outfit::{ItemStatus, ItemType, OutfitRecord, Rating, WardrobeItem};
use crate::types::{DbId, WearDate};

/// Read-only access to one user's wardrobe.
///
/// The four fetches used by a suggestion request are independent and may be
/// issued concurrently.
#[async_trait]
pub trait WardrobeSource: Send + Sync {
    /// Items the user can currently wear.
    async fn list_available_items(&self, user_id: DbId) -> Result<Vec<WardrobeItem>, CoreError>;

    /// Ids of withheld or retired items.
    async fn list_unavailable_items(&self, user_id: DbId) -> Result<Vec<DbId>, CoreError>;

    /// Most recent wear date per item, over all dated outfits containing it.
    async fn last_worn_dates_by_item(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, WearDate>, CoreError>;

    /// Outfits rated at least `min_rating`, with their items and stored tags.
    async fn list_eligible_outfits(
        &self,
        user_id: DbId,
        min_rating: Rating,
    ) -> Result<Vec<OutfitRecord>, CoreError>;

    /// Full outfit records for the given ids. Unknown ids are skipped; the
    /// result order is unspecified.
    async fn load_outfits_by_ids(
        &self,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<OutfitRecord>, CoreError>;

    /// Liveness of the backing store, reported by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StoredItem {
    pub id: DbId,
    pub user_id: DbId,
    pub item_type: ItemType,
    pub status: ItemStatus,
}

/// Vector-backed wardrobe for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWardrobe {
    items: Vec<StoredItem>,
    outfits: Vec<(DbId, OutfitRecord)>,
}

impl InMemoryWardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(
        mut self,
        user_id: DbId,
        id: DbId,
        item_type: ItemType,
        status: ItemStatus,
    ) -> Self {
        self.items.push(StoredItem {
            id,
            user_id,
            item_type,
            status,
        });
        self
    }

    pub fn with_outfit(mut self, user_id: DbId, outfit: OutfitRecord) -> Self {
        self.outfits.push((user_id, outfit));
        self
    }

    fn items_of(&self, user_id: DbId) -> impl Iterator<Item = &StoredItem> {
        self.items.iter().filter(move |i| i.user_id == user_id)
    }

    fn outfits_of(&self, user_id: DbId) -> impl Iterator<Item = &OutfitRecord> {
        self.outfits
            .iter()
            .filter(move |(owner, _)| *owner == user_id)
            .map(|(_, o)| o)
    }
}

#[async_trait]
impl WardrobeSource for InMemoryWardrobe {
    async fn list_available_items(&self, user_id: DbId) -> Result<Vec<WardrobeItem>, CoreError> {
        Ok(self
            .items_of(user_id)
            .filter(|i| i.status == ItemStatus::Available)
            .map(|i| WardrobeItem {
                id: i.id,
                item_type: i.item_type,
            })
            .collect())
    }

    async fn list_unavailable_items(&self, user_id: DbId) -> Result<Vec<DbId>, CoreError> {
        Ok(self
            .items_of(user_id)
            .filter(|i| i.status != ItemStatus::Available)
            .map(|i| i.id)
            .collect())
    }

    async fn last_worn_dates_by_item(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, WearDate>, CoreError> {
        let mut last_worn: HashMap<DbId, WearDate> = HashMap::new();
        for outfit in self.outfits_of(user_id) {
            let Some(date) = outfit.wear_date else {
                continue;
            };
            for item_id in outfit.item_ids() {
                last_worn
                    .entry(item_id)
                    .and_modify(|d| *d = (*d).max(date))
                    .or_insert(date);
            }
        }
        Ok(last_worn)
    }

    async fn list_eligible_outfits(
        &self,
        user_id: DbId,
        min_rating: Rating,
    ) -> Result<Vec<OutfitRecord>, CoreError> {
        let mut outfits: Vec<OutfitRecord> = self
            .outfits_of(user_id)
            .filter(|o| o.rating >= min_rating)
            .cloned()
            .collect();
        outfits.sort_by(|a, b| b.wear_date.cmp(&a.wear_date).then(b.id.cmp(&a.id)));
        Ok(outfits)
    }

    async fn load_outfits_by_ids(
        &self,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<OutfitRecord>, CoreError> {
        Ok(self
            .outfits_of(user_id)
            .filter(|o| ids.contains(&o.id))
            .cloned()
            .collect())
    }
}

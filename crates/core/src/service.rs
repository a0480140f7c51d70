//! Async services that fetch from a [`WardrobeSource`] and run the engine.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::eligibility::FILTER_AVAILABLE_ONLY;
use crate::listing::{select_listing, ListingQuery, OutfitView};
use crate::outfit::{OutfitRecord, Rating};
use crate::source::WardrobeSource;
use crate::suggestion::{self, Suggestion, SuggestionQuery, SuggestionResponse, WardrobeInputs};
use crate::types::{DbId, Timestamp};

/// Fetch one user's wardrobe, rank suggestions and hydrate the page.
///
/// The four snapshot fetches run concurrently. Outfits that vanish between
/// ranking and hydration are dropped from the page after `last_page` is
/// decided, so a page may hold fewer than `size` suggestions while
/// `last_page` is still `false`. Only `last_page` marks the end.
pub async fn suggest_outfits<S>(
    source: &S,
    user_id: DbId,
    query: &SuggestionQuery,
    now: Timestamp,
) -> Result<SuggestionResponse, CoreError>
where
    S: WardrobeSource + ?Sized,
{
    let (available_items, unavailable, last_worn, outfits) = tokio::try_join!(
        source.list_available_items(user_id),
        source.list_unavailable_items(user_id),
        source.last_worn_dates_by_item(user_id),
        source.list_eligible_outfits(user_id, Rating::MIN_SUGGESTION),
    )?;

    let inputs = WardrobeInputs {
        available_items,
        unavailable_item_ids: unavailable.into_iter().collect(),
        last_worn,
        outfits,
    };
    let output = suggestion::run(inputs, query, now);

    let ids: Vec<DbId> = output.page.items.iter().map(|s| s.outfit.id).collect();
    let mut records = load_by_id(source, user_id, &ids).await?;

    let suggestions = output
        .page
        .items
        .into_iter()
        .filter_map(|scored| match records.remove(&scored.outfit.id) {
            Some(record) => Some(Suggestion::new(record, scored)),
            None => {
                tracing::warn!(
                    user_id,
                    outfit_id = scored.outfit.id,
                    "Ranked outfit missing on hydration, dropping",
                );
                None
            }
        })
        .collect();

    Ok(SuggestionResponse {
        suggestions,
        generated_at: now,
        metadata: output.metadata,
    })
}

async fn load_by_id<S>(
    source: &S,
    user_id: DbId,
    ids: &[DbId],
) -> Result<HashMap<DbId, OutfitRecord>, CoreError>
where
    S: WardrobeSource + ?Sized,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let records = source.load_outfits_by_ids(user_id, ids).await?;
    Ok(records.into_iter().map(|r| (r.id, r)).collect())
}

// ---------------------------------------------------------------------------
// General listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct OutfitListing {
    pub outfits: Vec<OutfitView>,
    pub last_page: bool,
    pub filter_applied: &'static str,
    #[serde(rename = "tagId", skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
}

/// List outfits without the suggestion-only gates.
pub async fn list_outfits<S>(
    source: &S,
    user_id: DbId,
    query: &ListingQuery,
) -> Result<OutfitListing, CoreError>
where
    S: WardrobeSource + ?Sized,
{
    let (outfits, unavailable) = tokio::try_join!(
        source.list_eligible_outfits(user_id, query.min_rating),
        source.list_unavailable_items(user_id),
    )?;
    let unavailable: HashSet<DbId> = unavailable.into_iter().collect();

    let page = select_listing(outfits, &unavailable, query);
    tracing::debug!(
        user_id,
        returned = page.items.len(),
        last_page = page.last_page,
        "Outfit listing built",
    );

    Ok(OutfitListing {
        outfits: page.items.into_iter().map(OutfitView::from).collect(),
        last_page: page.last_page,
        filter_applied: FILTER_AVAILABLE_ONLY,
        tag_id: query.tag_filter.map(|f| f.id_string()),
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::eligibility::{FILTER_COMPLETE_ONLY, FILTER_NO_ELIGIBLE};
    use crate::outfit::{ItemStatus, ItemType, OutfitItem, WardrobeItem};
    use crate::ranking::PageRequest;
    use crate::source::InMemoryWardrobe;
    use crate::types::WearDate;

    const USER: DbId = 1;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> Option<WearDate> {
        Some(now().date_naive() - Duration::days(days))
    }

    fn outfit(id: DbId, rating: Rating, wear_date: Option<WearDate>, items: &[(DbId, ItemType)]) -> OutfitRecord {
        OutfitRecord {
            id,
            name: Some(format!("Look {id}")),
            rating,
            wear_date,
            items: items
                .iter()
                .map(|&(item_id, item_type)| OutfitItem { item_id, item_type })
                .collect(),
            tag_ids: vec![],
        }
    }

    fn base_wardrobe() -> InMemoryWardrobe {
        InMemoryWardrobe::new()
            .with_item(USER, 1, ItemType::Top, ItemStatus::Available)
            .with_item(USER, 2, ItemType::Bottom, ItemStatus::Available)
            .with_item(USER, 3, ItemType::Footwear, ItemStatus::Available)
            .with_item(USER, 4, ItemType::Top, ItemStatus::Retired)
            .with_item(USER, 5, ItemType::Accessory, ItemStatus::Available)
    }

    const LOOK: &[(DbId, ItemType)] = &[(1, ItemType::Top), (2, ItemType::Bottom), (3, ItemType::Footwear)];

    #[tokio::test]
    async fn empty_wardrobe_returns_diagnostic() {
        let response = suggest_outfits(&InMemoryWardrobe::new(), USER, &SuggestionQuery::default(), now())
            .await
            .unwrap();
        assert!(response.suggestions.is_empty());
        assert_eq!(response.metadata.filter_applied, FILTER_NO_ELIGIBLE);
        assert!(response.metadata.last_page);
    }

    #[tokio::test]
    async fn suggestions_exclude_retired_items() {
        let source = base_wardrobe()
            .with_outfit(USER, outfit(1, Rating::Hit, days_ago(10), LOOK))
            .with_outfit(
                USER,
                outfit(2, Rating::Hit, days_ago(10), &[(4, ItemType::Top), (2, ItemType::Bottom), (3, ItemType::Footwear)]),
            );

        let response = suggest_outfits(&source, USER, &SuggestionQuery::default(), now())
            .await
            .unwrap();
        let ids: Vec<DbId> = response.suggestions.iter().map(|s| s.outfit.outfit.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(response.suggestions[0].outfit.outfit.name.as_deref(), Some("Look 1"));
        assert_eq!(response.metadata.wardrobe_size, 4);
    }

    #[tokio::test]
    async fn incomplete_outfit_is_listed_but_not_suggested() {
        let source = base_wardrobe().with_outfit(
            USER,
            outfit(7, Rating::Mid, days_ago(3), &[(1, ItemType::Top), (2, ItemType::Bottom)]),
        );

        let response = suggest_outfits(&source, USER, &SuggestionQuery::default(), now())
            .await
            .unwrap();
        assert!(response.suggestions.is_empty());
        assert_eq!(response.metadata.filter_applied, FILTER_COMPLETE_ONLY);

        let listing = list_outfits(&source, USER, &ListingQuery::default()).await.unwrap();
        assert_eq!(listing.outfits.len(), 1);
        assert_eq!(listing.outfits[0].outfit.id, 7);
        assert!(listing.last_page);
    }

    #[tokio::test]
    async fn wear_count_reflects_repeated_look() {
        let source = base_wardrobe()
            .with_outfit(USER, outfit(1, Rating::Mid, days_ago(60), LOOK))
            .with_outfit(USER, outfit(2, Rating::Mid, days_ago(5), LOOK))
            .with_outfit(
                USER,
                outfit(3, Rating::Mid, days_ago(30), &[(1, ItemType::Top), (2, ItemType::Bottom), (3, ItemType::Footwear), (5, ItemType::Accessory)]),
            );

        let response = suggest_outfits(&source, USER, &SuggestionQuery::default(), now())
            .await
            .unwrap();
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].outfit.outfit.id, 2);
        assert_eq!(response.suggestions[0].scoring_details.raw_data.wear_count, 3);
        assert_eq!(response.suggestions[0].scoring_details.frequency_score, 4);
    }

    /// Wrapper that forgets outfits on hydration to simulate a concurrent delete.
    struct ForgetfulSource {
        inner: InMemoryWardrobe,
        forget: DbId,
    }

    #[async_trait]
    impl WardrobeSource for ForgetfulSource {
        async fn list_available_items(&self, user_id: DbId) -> Result<Vec<WardrobeItem>, CoreError> {
            self.inner.list_available_items(user_id).await
        }

        async fn list_unavailable_items(&self, user_id: DbId) -> Result<Vec<DbId>, CoreError> {
            self.inner.list_unavailable_items(user_id).await
        }

        async fn last_worn_dates_by_item(
            &self,
            user_id: DbId,
        ) -> Result<HashMap<DbId, WearDate>, CoreError> {
            self.inner.last_worn_dates_by_item(user_id).await
        }

        async fn list_eligible_outfits(
            &self,
            user_id: DbId,
            min_rating: Rating,
        ) -> Result<Vec<OutfitRecord>, CoreError> {
            self.inner.list_eligible_outfits(user_id, min_rating).await
        }

        async fn load_outfits_by_ids(
            &self,
            user_id: DbId,
            ids: &[DbId],
        ) -> Result<Vec<OutfitRecord>, CoreError> {
            let mut loaded = self.inner.load_outfits_by_ids(user_id, ids).await?;
            loaded.retain(|o| o.id != self.forget);
            Ok(loaded)
        }
    }

    #[tokio::test]
    async fn hydration_misses_are_dropped_and_order_kept() {
        let inner = InMemoryWardrobe::new()
            .with_outfit(USER, outfit(1, Rating::Mid, days_ago(20), &[(11, ItemType::Top), (12, ItemType::Bottom), (13, ItemType::Footwear)]))
            .with_outfit(USER, outfit(2, Rating::Mid, days_ago(1), &[(21, ItemType::Top), (22, ItemType::Bottom), (23, ItemType::Footwear)]))
            .with_outfit(USER, outfit(3, Rating::Hit, days_ago(15), &[(31, ItemType::Top), (32, ItemType::Bottom), (33, ItemType::Footwear)]));
        let source = ForgetfulSource { inner, forget: 3 };

        let response = suggest_outfits(&source, USER, &SuggestionQuery::default(), now())
            .await
            .unwrap();
        // No wardrobe items, so every item counts as fresh: the hit ranks
        // first, then ties keep the newest-first fetch order.
        let ids: Vec<DbId> = response.suggestions.iter().map(|s| s.outfit.outfit.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn short_page_after_hydration_miss_keeps_last_page_flag() {
        let inner = InMemoryWardrobe::new()
            .with_outfit(USER, outfit(1, Rating::Hit, days_ago(20), &[(11, ItemType::Top), (12, ItemType::Bottom), (13, ItemType::Footwear)]))
            .with_outfit(USER, outfit(2, Rating::Mid, days_ago(10), &[(21, ItemType::Top), (22, ItemType::Bottom), (23, ItemType::Footwear)]))
            .with_outfit(USER, outfit(3, Rating::Mid, days_ago(5), &[(31, ItemType::Top), (32, ItemType::Bottom), (33, ItemType::Footwear)]));
        let source = ForgetfulSource { inner, forget: 1 };
        let query = SuggestionQuery {
            page: PageRequest { page: 0, size: 2 },
            tag_filter: None,
        };

        let response = suggest_outfits(&source, USER, &query, now()).await.unwrap();
        // Outfit 1 ranks first (hit), then disappears on hydration.
        let ids: Vec<DbId> = response.suggestions.iter().map(|s| s.outfit.outfit.id).collect();
        assert_eq!(ids.len(), 1);
        assert!(!ids.contains(&1));
        assert!(!response.metadata.last_page);
    }

    #[tokio::test]
    async fn listing_pages_and_echoes_tag() {
        let mut source = InMemoryWardrobe::new();
        for id in 1..=5 {
            let day = NaiveDate::from_ymd_opt(2024, 6, id as u32);
            source = source.with_outfit(USER, outfit(id, Rating::Mid, day, &[]));
        }
        let query = ListingQuery {
            page: PageRequest { page: 0, size: 2 },
            ..ListingQuery::default()
        };
        let listing = list_outfits(&source, USER, &query).await.unwrap();
        assert_eq!(listing.outfits.iter().map(|o| o.outfit.id).collect::<Vec<_>>(), vec![5, 4]);
        assert!(!listing.last_page);
        assert_eq!(listing.filter_applied, FILTER_AVAILABLE_ONLY);
        assert!(listing.tag_id.is_none());
    }
}

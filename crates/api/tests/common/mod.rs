#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use wardrobe_api::config::ServerConfig;
use wardrobe_api::router::build_app_router;
use wardrobe_api::state::{AppState, Clock};
use wardrobe_core::outfit::{ItemStatus, ItemType, OutfitItem, OutfitRecord, Rating};
use wardrobe_core::source::InMemoryWardrobe;
use wardrobe_core::types::{DbId, Timestamp, WearDate};

pub const USER: DbId = 1;

/// The instant every test request is served at.
pub fn test_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> Option<WearDate> {
    Some(test_now().date_naive() - Duration::days(days))
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router over an in-memory wardrobe, with the
/// clock pinned to [`test_now`].
pub fn build_test_app(source: InMemoryWardrobe) -> Router {
    let config = test_config();
    let state = AppState {
        source: Arc::new(source),
        config: Arc::new(config.clone()),
        clock: Clock::Fixed(test_now()),
    };
    build_app_router(state, &config).unwrap()
}

pub fn outfit(
    id: DbId,
    rating: Rating,
    wear_date: Option<WearDate>,
    items: &[(DbId, ItemType)],
) -> OutfitRecord {
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

/// A small wardrobe exercising every gate:
///
/// - 10: hit, complete, worn 10 days ago
/// - 11: mid, contains retired item 4
/// - 12: mid idea outfit, incomplete (no footwear)
/// - 13: miss, complete, worn 30 days ago
/// - 14: mid idea outfit, complete, stored tag 7
pub fn sample_wardrobe() -> InMemoryWardrobe {
    use ItemType::*;

    InMemoryWardrobe::new()
        .with_item(USER, 1, Top, ItemStatus::Available)
        .with_item(USER, 2, Bottom, ItemStatus::Available)
        .with_item(USER, 3, Footwear, ItemStatus::Available)
        .with_item(USER, 4, Top, ItemStatus::Retired)
        .with_item(USER, 5, Footwear, ItemStatus::Available)
        .with_outfit(USER, outfit(10, Rating::Hit, days_ago(10), &[(1, Top), (2, Bottom), (3, Footwear)]))
        .with_outfit(USER, outfit(11, Rating::Mid, days_ago(3), &[(4, Top), (2, Bottom), (3, Footwear)]))
        .with_outfit(USER, outfit(12, Rating::Mid, None, &[(1, Top), (2, Bottom)]))
        .with_outfit(USER, outfit(13, Rating::Miss, days_ago(30), &[(1, Top), (2, Bottom), (3, Footwear)]))
        .with_outfit(USER, {
            let mut idea = outfit(14, Rating::Mid, None, &[(1, Top), (2, Bottom), (5, Footwear)]);
            idea.tag_ids = vec![7];
            idea
        })
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of the outfits in a JSON array.
pub fn ids(array: &serde_json::Value) -> Vec<i64> {
    array
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect()
}

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use wardrobe_core::source::WardrobeSource;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// Handler for `GET /health`.
///
/// Reports "degraded" when the wardrobe store does not answer.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.source.ping().await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Build the health-check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

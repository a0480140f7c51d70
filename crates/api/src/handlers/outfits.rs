//! Handlers for outfit suggestions and the general outfit listing.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use wardrobe_core::error::CoreError;
use wardrobe_core::listing::ListingQuery;
use wardrobe_core::service;
use wardrobe_core::suggestion::SuggestionQuery;
use wardrobe_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::{ListingParams, SuggestionParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Unwrap the `{user_id}` segment, rejecting non-numeric and non-positive ids.
fn user_id_from(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    let Path(user_id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if user_id <= 0 {
        return Err(CoreError::Validation(format!("user_id must be positive, got {user_id}")).into());
    }
    Ok(user_id)
}

/// GET /api/v1/users/{user_id}/outfits/suggestions
///
/// Ranked outfit suggestions for the user's current wardrobe. The body is
/// the suggestion response itself, not wrapped in `data`.
pub async fn suggest_outfits(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    Query(params): Query<SuggestionParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_from(path)?;
    let query = SuggestionQuery::try_from(params)?;

    let response =
        service::suggest_outfits(state.source.as_ref(), user_id, &query, state.clock.now()).await?;

    tracing::info!(
        user_id,
        page = query.page.page,
        returned = response.suggestions.len(),
        filter = response.metadata.filter_applied,
        "Outfit suggestions served",
    );

    Ok(Json(response))
}

/// GET /api/v1/users/{user_id}/outfits
///
/// Page through the user's outfits, newest first. Outfits with
/// unavailable items are hidden.
pub async fn list_outfits(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    Query(params): Query<ListingParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_from(path)?;
    let query = ListingQuery::try_from(params)?;

    let listing = service::list_outfits(state.source.as_ref(), user_id, &query).await?;

    Ok(Json(DataResponse { data: listing }))
}

//! Route definitions for outfit endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::outfits;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/outfits", get(outfits::list_outfits))
        .route(
            "/users/{user_id}/outfits/suggestions",
            get(outfits::suggest_outfits),
        )
}

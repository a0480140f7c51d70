pub mod health;
pub mod outfits;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/{user_id}/outfits                 list (GET)
/// /users/{user_id}/outfits/suggestions     ranked suggestions (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(outfits::router())
}

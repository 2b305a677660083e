use axum::routing::get;
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// Place routes.
///
/// ```text
/// GET    /places          -> list_places
/// GET    /places/{id}     -> get_place
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/places", get(places::list_places))
        .route("/places/{id}", get(places::get_place))
}

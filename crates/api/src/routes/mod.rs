pub mod health;
pub mod letters;
pub mod places;
pub mod proofread;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// GET    /health              health_check
/// GET    /                    list_full_letters
/// GET    /letters             list_letters
/// GET    /letters/{id}        get_letter
/// GET    /places              list_places
/// GET    /places/{id}         get_place
/// POST   /proofread/{id}      proofread_letter
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(letters::router())
        .merge(places::router())
        .merge(proofread::router())
}

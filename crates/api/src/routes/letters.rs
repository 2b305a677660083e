use axum::routing::get;
use axum::Router;

use crate::handlers::letters;
use crate::state::AppState;

/// Letter routes.
///
/// ```text
/// GET    /                -> list_full_letters
/// GET    /letters         -> list_letters
/// GET    /letters/{id}    -> get_letter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(letters::list_full_letters))
        .route("/letters", get(letters::list_letters))
        .route("/letters/{id}", get(letters::get_letter))
}

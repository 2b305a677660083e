use axum::routing::post;
use axum::Router;

use crate::handlers::proofread;
use crate::state::AppState;

/// Mount the modernization route.
pub fn router() -> Router<AppState> {
    Router::new().route("/proofread/{id}", post(proofread::proofread_letter))
}

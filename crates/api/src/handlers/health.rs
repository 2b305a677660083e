use axum::extract::State;
use axum::Json;

use jernkorset_core::models::HealthResponse;

use crate::state::AppState;

/// GET /health
///
/// Always healthy once the archive is loaded; reports the store sizes.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        letter_count: state.archive.letter_count(),
        place_count: state.archive.place_count(),
    })
}

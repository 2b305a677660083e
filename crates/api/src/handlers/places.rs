use axum::extract::State;
use axum::Json;

use jernkorset_core::models::{Place, PlacesResponse};

use crate::error::AppResult;
use crate::extract::IdParam;
use crate::state::AppState;

/// GET /places
pub async fn list_places(State(state): State<AppState>) -> Json<PlacesResponse> {
    let items = state.archive.places().clone();
    Json(PlacesResponse {
        total: items.len(),
        items,
    })
}

/// GET /places/{id}
pub async fn get_place(
    State(state): State<AppState>,
    IdParam(place_id): IdParam,
) -> AppResult<Json<Place>> {
    Ok(Json(state.archive.place(place_id)?.clone()))
}

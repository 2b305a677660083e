use axum::extract::State;
use axum::Json;

use jernkorset_core::models::{Letter, LetterSummary};

use crate::error::AppResult;
use crate::extract::IdParam;
use crate::state::AppState;

/// GET /
///
/// Every letter with its full text, in archive order.
pub async fn list_full_letters(State(state): State<AppState>) -> Json<Vec<Letter>> {
    Json(state.archive.letters().to_vec())
}

/// GET /letters
///
/// Letter summaries (no text), in archive order.
pub async fn list_letters(State(state): State<AppState>) -> Json<Vec<LetterSummary>> {
    Json(state.archive.summaries())
}

/// GET /letters/{id}
pub async fn get_letter(
    State(state): State<AppState>,
    IdParam(letter_id): IdParam,
) -> AppResult<Json<Letter>> {
    let letter = state.archive.letter(letter_id)?;
    Ok(Json(letter.clone()))
}

//! Letter modernization through the injected [`jernkorset_core::modernize::Modernizer`].

use axum::extract::State;
use axum::Json;

use jernkorset_core::models::ProofreadResponse;

use crate::error::AppResult;
use crate::extract::IdParam;
use crate::state::AppState;

/// POST /proofread/{id}
///
/// Validates the id like `GET /letters/{id}`, then sends the letter text to
/// the modernizer. A missing credential surfaces as `CONFIGURATION_ERROR`,
/// any other backend failure as `MODERNIZATION_ERROR`. No retries.
pub async fn proofread_letter(
    State(state): State<AppState>,
    IdParam(letter_id): IdParam,
) -> AppResult<Json<ProofreadResponse>> {
    let letter = state.archive.letter(letter_id)?;
    tracing::info!(letter_id, chars = letter.text.chars().count(), "Modernizing letter");

    let modernized = state.modernizer.modernize(&letter.text).await?;
    let tokens_per_second = if modernized.tokens_per_second.is_finite() {
        modernized.tokens_per_second.max(0.0)
    } else {
        0.0
    };
    tracing::info!(letter_id, tokens_per_second, "Letter modernized");

    Ok(Json(ProofreadResponse {
        text: modernized.text,
        tokens_per_second,
        original_letter_id: letter.id,
    }))
}

//! Custom extractors that reject with [`AppError`] instead of plain text.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use jernkorset_core::types::RecordId;

use crate::error::AppError;

/// A single numeric path parameter, e.g. the `{id}` in `/letters/{id}`.
///
/// Non-integer values reject with [`AppError::InvalidRequest`]; range checks
/// are left to the archive so they produce domain errors. Integers too large
/// for [`RecordId`] saturate to its bounds and so still land on those checks.
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub RecordId);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
        parse_id(&raw).map(Self)
    }
}

/// Parse a decimal integer, clamping out-of-range values to the `RecordId` bounds.
fn parse_id(raw: &str) -> Result<RecordId, AppError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidRequest(format!(
            "Cannot parse `{raw}` to an integer"
        )));
    }
    Ok(raw.parse::<RecordId>().unwrap_or(if raw.starts_with('-') {
        RecordId::MIN
    } else {
        RecordId::MAX
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-7").unwrap(), -7);
        assert_eq!(parse_id("0").unwrap(), 0);
    }

    #[test]
    fn overflowing_integers_saturate() {
        assert_eq!(parse_id("99999999999999999999").unwrap(), RecordId::MAX);
        assert_eq!(parse_id("-99999999999999999999").unwrap(), RecordId::MIN);
    }

    #[test]
    fn non_integers_are_rejected() {
        for raw in ["abc", "", "-", "1.5", "+3", "12a", " 1"] {
            assert_matches!(parse_id(raw), Err(AppError::InvalidRequest(_)), "{raw:?}");
        }
    }
}

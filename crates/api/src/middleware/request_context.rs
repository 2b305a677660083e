use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::Instrument;

use crate::error::ErrorReport;
use crate::middleware::request_id::request_id_of;
use crate::state::AppState;

/// Wrap every handler in a span tagged with the correlation id.
///
/// Error responses produced by [`crate::error::AppError`] are re-rendered
/// here with the request id filled in. Domain errors are logged at `WARN`;
/// internal errors at `ERROR` with their diagnostic, which only reaches the
/// client when the service runs in debug mode.
pub async fn request_context(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request_id_of(&request);
    let span = tracing::info_span!(
        "request",
        request_id = request_id.as_deref().unwrap_or("-"),
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        tracing::debug!("Request received");
        let response = next.run(request).await;
        finish(response, request_id, state.settings.debug)
    }
    .instrument(span)
    .await
}

fn finish(mut response: Response, request_id: Option<String>, debug: bool) -> Response {
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let ErrorReport {
        status,
        mut body,
        internal_detail,
    } = report;
    body.request_id = request_id;

    match internal_detail {
        Some(diagnostic) => {
            tracing::error!(
                status = status.as_u16(),
                error_code = %body.error_code,
                error = %diagnostic,
                "Unhandled error"
            );
            if debug {
                body.detail = Some(diagnostic);
            }
        }
        None => {
            tracing::warn!(
                status = status.as_u16(),
                error_code = %body.error_code,
                message = %body.message,
                detail = body.detail.as_deref().unwrap_or(""),
                "Request failed"
            );
        }
    }

    (status, Json(body)).into_response()
}

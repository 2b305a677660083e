use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use jernkorset_core::error::ArchiveError;
use jernkorset_core::models::ErrorResponse;
use jernkorset_core::modernize::ModernizeError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ArchiveError`] for domain errors and adds the failures that only
/// exist at the HTTP layer. Every variant renders as an [`ErrorResponse`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A declared domain error.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A path parameter failed to parse.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No route matched the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// The route exists but not for this method.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    /// Anything unexpected. The text is logged, never shown outside debug mode.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ModernizeError> for AppError {
    fn from(err: ModernizeError) -> Self {
        Self::Archive(err.into())
    }
}

/// An error response that still needs its request id.
///
/// [`AppError`] renders a complete body but cannot see the request. It
/// attaches this report to the response extensions; the request-context
/// middleware stamps the request id, applies debug redaction and logs it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub body: ErrorResponse,
    /// Diagnostic text of an unexpected failure.
    pub internal_detail: Option<String>,
}

impl AppError {
    /// Split the error into status, envelope and (for internal errors) the
    /// server-side diagnostic.
    pub fn report(&self) -> ErrorReport {
        let (status, error_code, message, detail, internal_detail) = match self {
            AppError::Archive(err) => (
                StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                err.error_code(),
                err.message(),
                err.detail(),
                None,
            ),
            AppError::InvalidRequest(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
                Some(reason.clone()),
                None,
            ),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Route {path} not found"),
                None,
                None,
            ),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                format!("Method {method} not allowed"),
                None,
                None,
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
                Some(msg.clone()),
            ),
        };

        ErrorReport {
            status,
            body: ErrorResponse {
                error_code: error_code.to_string(),
                message,
                detail,
                request_id: None,
            },
            internal_detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.report();
        let mut response = (report.status, Json(&report.body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Turn a handler panic into the generic internal-error response.
///
/// Used with [`tower_http::catch_panic::CatchPanicLayer::custom`].
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {reason}")).into_response()
}

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Any path with no route.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// A known path requested with an unsupported method.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

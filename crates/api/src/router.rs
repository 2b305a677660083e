//! Shared application router builder.
//!
//! [`build_app_router`] is used by both the binary (`main.rs`) and the
//! integration tests (`tests/common/mod.rs`), so tests exercise the same
//! middleware stack as production.

use std::time::Duration;

use axum::http::header::HeaderName;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{CorsOrigins, Settings};
use crate::error::panic_response;
use crate::handlers::fallback;
use crate::middleware::request_context::request_context;
use crate::middleware::request_id::{MakeShortRequestId, REQUEST_ID_HEADER};
use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack, outermost first:
///
/// 1. Set request ID on incoming requests
/// 2. Propagate request ID to the response
/// 3. Structured request/response tracing
/// 4. CORS
/// 5. Request context: span, logging, error envelope finishing
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.settings);
    let request_id_header = REQUEST_ID_HEADER.clone();

    Router::new()
        .merge(routes::api_routes())
        .fallback(fallback::route_not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_context,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeShortRequestId))
        .with_state(state)
}

/// Build the CORS middleware layer from settings.
///
/// `*` allows any origin, method and header without credentials. An explicit
/// origin list mirrors the requested method and headers and allows
/// credentials. The request id header is always exposed to scripts.
pub fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let expose = [HeaderName::clone(&REQUEST_ID_HEADER)];

    match &settings.cors_origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(expose),
        CorsOrigins::List(origins) => {
            // Origins were validated when the settings were parsed.
            let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
                .expose_headers(expose)
                .max_age(Duration::from_secs(3600))
        }
    }
}

//! Integration tests for `POST /proofread/{id}`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_app_with, build_test_app, post, request_id, test_archive, test_settings,
    StubBehaviour, StubModernizer,
};
use jernkorset_api::config::{ModernizerBackend, Settings};
use jernkorset_api::state::build_modernizer;
use jernkorset_core::modernize::ModernizeError;

#[tokio::test]
async fn proofread_wraps_modernized_text() {
    let stub = StubModernizer::replying("Kære Moder, alt er vel her.", 87.5);
    let response = post(build_test_app(stub.clone()), "/proofread/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "Kære Moder, alt er vel her.");
    assert_eq!(json["tokens_per_second"], 87.5);
    assert_eq!(json["original_letter_id"], 2);

    // The modernizer sees the normalized letter text.
    let calls = stub.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), ["Kaere Moder,\n\nalt er vel her."]);
}

#[tokio::test]
async fn negative_throughput_is_clamped() {
    let stub = StubModernizer::replying("ok", -3.0);
    let json = body_json(post(build_test_app(stub), "/proofread/1").await).await;
    assert_eq!(json["tokens_per_second"], 0.0);
}

#[tokio::test]
async fn invalid_ids_never_reach_the_modernizer() {
    let stub = StubModernizer::replying("unused", 1.0);

    let response = post(build_test_app(stub.clone()), "/proofread/0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "INVALID_LETTER_ID");

    let response = post(build_test_app(stub.clone()), "/proofread/4").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "LETTER_NOT_FOUND");

    let response = post(build_test_app(stub.clone()), "/proofread/99999999999999999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "LETTER_NOT_FOUND");

    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let stub = StubModernizer::new(StubBehaviour::Fail(ModernizeError::MissingCredential(
        "ANTHROPIC_API_KEY".into(),
    )));
    let response = post(build_test_app(stub), "/proofread/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header_id = request_id(&response);

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "CONFIGURATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("ANTHROPIC_API_KEY"));
    assert_eq!(json["request_id"], header_id);
}

#[tokio::test]
async fn backend_failure_is_a_modernization_error() {
    let stub = StubModernizer::new(StubBehaviour::Fail(ModernizeError::Failed(
        "timeout".into(),
    )));
    let response = post(build_test_app(stub), "/proofread/1").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "MODERNIZATION_ERROR");
    assert!(json["detail"].as_str().unwrap().contains("timeout"));
}

#[tokio::test]
async fn configured_anthropic_backend_without_key_is_a_configuration_error() {
    let settings = Settings::from_lookup(|key| {
        (key == "MODERNIZER").then(|| "anthropic".to_string())
    })
    .unwrap();
    assert_eq!(settings.modernizer.backend, ModernizerBackend::Anthropic);

    let modernizer = build_modernizer(&settings.modernizer);
    let app = build_app_with(test_archive(), modernizer, settings);
    let response = post(app, "/proofread/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error_code"], "CONFIGURATION_ERROR");
}

// ---------------------------------------------------------------------------
// Unexpected failures: a panicking backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panic_becomes_internal_error_without_detail() {
    let stub = StubModernizer::new(StubBehaviour::Panic);
    let response = post(build_test_app(stub), "/proofread/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    request_id(&response);

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
    assert!(json["detail"].is_null());
    assert!(json["request_id"].is_string());
}

#[tokio::test]
async fn panic_detail_is_exposed_in_debug_mode() {
    let stub = StubModernizer::new(StubBehaviour::Panic);
    let app = build_app_with(test_archive(), stub, test_settings(true));
    let response = post(app, "/proofread/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("modernizer exploded"));
}

#[tokio::test]
async fn service_keeps_serving_after_a_panic() {
    let stub = StubModernizer::new(StubBehaviour::Panic);
    let app = build_test_app(Arc::clone(&stub) as _);
    let _ = post(app.clone(), "/proofread/1").await;

    let response = common::get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

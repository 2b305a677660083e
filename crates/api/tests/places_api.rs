//! Integration tests for `/places` and `/places/{id}`.

mod common;

use axum::http::StatusCode;
use common::{body_json, default_app, get};

#[tokio::test]
async fn list_places_total_matches_items() {
    let response = get(default_app(), "/places").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["items"].as_object().expect("items should be an object");
    assert_eq!(json["total"], 2);
    assert_eq!(items.len() as u64, json["total"].as_u64().unwrap());
    assert_eq!(items["1"]["name"], "Kobenhavn");
    assert_eq!(items["2"]["geometry"], "POINT(13.4050 52.5200)");
}

#[tokio::test]
async fn get_place_by_id() {
    let response = get(default_app(), "/places/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 2);
    assert_eq!(json["name"], "Berlin");
}

#[tokio::test]
async fn unknown_place_is_not_found() {
    let response = get(default_app(), "/places/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "PLACE_NOT_FOUND");
    assert!(json["message"].as_str().unwrap().contains("99"));
    assert!(json["detail"].is_null());
}

#[tokio::test]
async fn oversized_place_id_is_not_found() {
    let response = get(default_app(), "/places/99999999999999999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "PLACE_NOT_FOUND");
}

#[tokio::test]
async fn non_numeric_place_id_is_a_validation_error() {
    let response = get(default_app(), "/places/abc").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error_code"], "VALIDATION_ERROR");
}

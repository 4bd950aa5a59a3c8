//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint. The OpenAQ
//! client runs without an API key here, so lookups are served from the
//! synthetic demo generator and never touch the network.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use eco_tracker::api::create_router;
use eco_tracker::{AppState, Config};

// == Helper Functions ==

fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.cache_dir = Some(temp_dir.path().to_path_buf());
    (create_router(AppState::from_config(&config)), temp_dir)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Air Quality Endpoint Tests ==

#[tokio::test]
async fn test_air_quality_returns_stations() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/air-quality?latitude=55.75&longitude=37.62")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let stations = json.as_array().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0]["coordinates"]["latitude"], 55.75);
    assert!(!stations[0]["measurements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_air_quality_rejects_out_of_range_latitude() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/air-quality?latitude=999&longitude=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_air_quality_repeat_request_served_from_cache() {
    let (app, _temp_dir) = create_test_app();

    let request = || {
        Request::builder()
            .uri("/api/air-quality?latitude=49.28&longitude=-123.12")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(request()).await.unwrap();
    let first_json = body_to_json(first.into_body()).await;

    let second = app.oneshot(request()).await.unwrap();
    let second_json = body_to_json(second.into_body()).await;

    // Demo readings are randomized per fetch; byte-identical payloads mean
    // the second request hit the cache
    assert_eq!(first_json, second_json);
}

// == Measurements Endpoint Tests ==

#[tokio::test]
async fn test_measurements_honor_limit() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/measurements?parameter=pm25&limit=24")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let measurements = json.as_array().unwrap();
    assert_eq!(measurements.len(), 24);
    assert!(measurements.iter().all(|m| m["parameter"] == "pm25"));
}

#[tokio::test]
async fn test_measurements_reject_empty_parameter() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/measurements?parameter=&limit=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Settings Endpoint Tests ==

#[tokio::test]
async fn test_settings_default_for_new_user() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/user-1/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["notifications_email"], true);
    assert_eq!(json["notification_frequency"], "daily");
    assert_eq!(json["thresholds"]["pm25"], 35.0);
}

#[tokio::test]
async fn test_settings_partial_update_roundtrip() {
    let (app, _temp_dir) = create_test_app();

    let update = json!({ "default_location": "vancouver", "notifications_push": true });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/user-1/settings")
                .header("content-type", "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["default_location"], "vancouver");
    assert_eq!(json["notifications_push"], true);
    // Untouched fields keep their values
    assert_eq!(json["notifications_email"], true);

    // A fresh GET reflects the update
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/user-1/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["default_location"], "vancouver");
}

#[tokio::test]
async fn test_threshold_update() {
    let (app, _temp_dir) = create_test_app();

    let update = json!({ "parameter": "pm25", "value": 20.0 });
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/user-1/thresholds")
                .header("content-type", "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["thresholds"]["pm25"], 20.0);
    assert_eq!(json["thresholds"]["co2"], 1000.0);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_reflect_cache_population() {
    let (app, _temp_dir) = create_test_app();

    app.clone()
        .oneshot(
            Request::builder()
                .uri("/api/air-quality?latitude=1&longitude=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["air_quality"]["total_entries"], 1);
    assert_eq!(json["air_quality"]["valid_entries"], 1);
    assert_eq!(json["measurements"]["total_entries"], 0);
    assert_eq!(json["durable_cache_available"], true);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

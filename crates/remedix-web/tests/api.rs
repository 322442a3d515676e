//! End-to-end tests for the HTTP surface, driven through the router with `oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use remedix_classifier::{
    model::MockSpectralModel, LabelVocabulary, PlasticClassifier, ProportionalAllocation,
};
use remedix_reference::ReferenceTable;
use remedix_test_utils::{band_object, REFERENCE_CSV};
use remedix_web::{config::Config, router::build_router, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn table() -> ReferenceTable {
    ReferenceTable::from_reader(REFERENCE_CSV.as_bytes()).unwrap()
}

fn app() -> Router {
    build_router(AppState::new(table(), PlasticClassifier::heuristic_only(), &Config::default()))
}

fn app_with_model(pet: &[f32]) -> Router {
    let classifier = PlasticClassifier::new(
        Some(Arc::new(MockSpectralModel::with_pet_probabilities(pet))),
        LabelVocabulary::default(),
        ProportionalAllocation::default(),
    );
    build_router(AppState::new(table(), classifier, &Config::default()))
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_table_and_model() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["reference_rows"], 5);
    assert_eq!(body["plastic_types"], json!(["PET", "PE", "PP"]));
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_health_degraded_without_reference_data() {
    let app = build_router(AppState::new(
        ReferenceTable::default(),
        PlasticClassifier::heuristic_only(),
        &Config::default(),
    ));
    let (_, body) = get(app, "/health").await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_recommend_microbe() {
    let (status, body) = post(
        app(),
        "/recommend_microbe",
        json!({"plastic_type": "PET", "pH": 7.0, "temp": 30.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_microbe"], "Ideonella sakaiensis");
    assert_eq!(body["optimal_pH"], 7.0);
    assert_eq!(body["optimal_temp"], 30.0);
}

#[tokio::test]
async fn test_recommend_unknown_plastic_is_sentinel_not_error() {
    let (status, body) = post(
        app(),
        "/recommend_microbe",
        json!({"plastic_type": "PS", "pH": 7.0, "temp": 30.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_microbe"], "No suitable microbe found for PS");
    assert_eq!(body["optimal_pH"], 0.0);
}

#[tokio::test]
async fn test_recommend_missing_field_is_bad_request() {
    let (status, body) = post(app(), "/recommend_microbe", json!({"plastic_type": "PET", "pH": 7.0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Missing required fields"));
}

#[tokio::test]
async fn test_candidates_listed_best_first() {
    let (status, body) = get(app(), "/api/candidates?plastic_type=PET&pH=7.0&temp=30").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["microbe"], "Ideonella sakaiensis");
    assert_eq!(list[1]["microbe"], "Thermobifida fusca");
}

#[tokio::test]
async fn test_candidates_missing_query_field_is_json_bad_request() {
    let (status, body) = get(app(), "/api/candidates?plastic_type=PET").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().expect("JSON error body");
    assert!(error.contains("pH"), "got {error}");
}

#[tokio::test]
async fn test_monitor_defaults_to_optimal_conditions() {
    let (status, body) = post(
        app(),
        "/monitor_degradation",
        json!({"plastic_type": "PET", "microbe": "Ideonella sakaiensis", "elapsed_time": 30.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let progress = body["progress"].as_f64().unwrap();
    assert!((progress - 0.425).abs() < 1e-9);
    assert!(body["message"].as_str().unwrap().contains("42.5%"));
}

#[tokio::test]
async fn test_monitor_applies_condition_penalties() {
    let (_, body) = post(
        app(),
        "/monitor_degradation",
        json!({
            "plastic_type": "pet",
            "microbe": "ideonella sakaiensis",
            "elapsed_time": 30.0,
            "pH": 8.0,
            "temp": 30.0
        }),
    )
    .await;
    let progress = body["progress"].as_f64().unwrap();
    assert!((progress - 0.3825).abs() < 1e-9, "got {progress}");
}

#[tokio::test]
async fn test_monitor_caps_at_efficiency() {
    let (_, body) = post(
        app(),
        "/monitor_degradation",
        json!({"plastic_type": "PET", "microbe": "Ideonella sakaiensis", "elapsed_time": 600.0}),
    )
    .await;
    assert_eq!(body["progress"], 0.85);
}

#[tokio::test]
async fn test_monitor_unknown_pair() {
    let (status, body) = post(
        app(),
        "/monitor_degradation",
        json!({"plastic_type": "PET", "microbe": "Aspergillus niger", "elapsed_time": 10.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 0.0);
    assert_eq!(body["message"], "No data for Aspergillus niger degrading PET");
}

#[tokio::test]
async fn test_monitor_rejects_half_specified_conditions() {
    let (status, _) = post(
        app(),
        "/monitor_degradation",
        json!({"plastic_type": "PET", "microbe": "Ideonella sakaiensis", "elapsed_time": 10.0, "pH": 7.0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_identify_single_sample() {
    let (status, body) = post(app(), "/identify_plastic", band_object(&[0.15, 0.31, 0.29])).await;
    assert_eq!(status, StatusCode::OK);

    let row = &body["result"];
    assert_eq!(row["Plastic_Type"], "PET");
    assert_eq!(row["Recommended_Microbe"], "Ideonella sakaiensis");
    assert_eq!(row["Degradation_Progress"], "42.5%");
    assert_eq!(row["Optimal_pH"], "7.0");
    assert!(row.get("count").is_none());
    assert!(body["duration_sec"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_identify_batch_without_model_reports_prediction_error() {
    let samples = json!([band_object(&[0.12, 0.3]), band_object(&[0.15, 0.3]), band_object(&[0.11, 0.3])]);
    let (status, body) = post(app(), "/identify_plastic", samples).await;
    assert_eq!(status, StatusCode::OK);

    let report = body["report"].as_array().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0]["Plastic_Type"], "Error during prediction");
    assert_eq!(report[0]["Recommended_Microbe"], "N/A");
    assert_eq!(report[0]["count"], 3);
}

#[tokio::test]
async fn test_identify_batch_is_rebalanced_and_aggregated() {
    let pet = [0.01, 0.30, 0.05, 0.29, 0.02, 0.28, 0.03, 0.27, 0.04, 0.26, 0.25];
    let samples: Vec<Value> = (0..11).map(|i| band_object(&[0.1 + i as f64 * 0.01, 0.3])).collect();

    let (status, body) = post(app_with_model(&pet), "/identify_plastic", Value::Array(samples)).await;
    assert_eq!(status, StatusCode::OK);

    let report = body["report"].as_array().unwrap();
    let summary: Vec<(&str, u64)> = report
        .iter()
        .map(|r| (r["Plastic_Type"].as_str().unwrap(), r["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(summary, vec![("PE", 2), ("PET", 6), ("PP", 3)]);
    assert_eq!(report[0]["Recommended_Microbe"], "Rhodococcus ruber");
    assert_eq!(report[2]["Recommended_Microbe"], "Aspergillus niger");
}

#[tokio::test]
async fn test_identify_missing_band1_is_bad_request() {
    let (status, body) = post(app(), "/identify_plastic", json!({"band2": 0.3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("band1"));
}

#[tokio::test]
async fn test_identify_mismatched_band_counts_is_bad_request() {
    let samples = json!([band_object(&[0.12, 0.3]), band_object(&[0.15])]);
    let (status, _) = post(app(), "/identify_plastic", samples).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_identify_rejects_non_object_body() {
    let (status, _) = post(app(), "/identify_plastic", json!(0.15)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_identify_rejects_bands_beyond_feature_range() {
    let (status, body) = post(app(), "/identify_plastic", band_object(&[1e300, 0.3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("band1"));
}

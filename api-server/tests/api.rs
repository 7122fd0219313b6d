//! Router-level tests driven through `tower::ServiceExt::oneshot`

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use phishguard_core::{load_classifier, PredictionService};
use phishguard_server::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../models/phishing_forest.json")
}

fn app_with_model() -> Router {
    let model = load_classifier(demo_model_path()).unwrap();
    create_router(AppState::new(PredictionService::from_loaded(model)))
}

fn app_without_model() -> Router {
    create_router(AppState::new(PredictionService::unavailable()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn index_reports_model_status() {
    let (status, body) = send(app_with_model(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Phishing URL Detection API is running");
    assert_eq!(body["model_status"], "loaded");
    assert!(body["endpoints"]["/predict"].is_string());
    assert!(body["endpoints"]["/health"].is_string());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (_, body) = send(app_without_model(), get("/")).await;
    assert_eq!(body["model_status"], "not_loaded");
}

#[tokio::test]
async fn health_with_model() {
    let (status, body) = send(app_with_model(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "model_loaded": true,
            "message": "API is running correctly"
        })
    );
}

#[tokio::test]
async fn health_without_model_is_still_200() {
    let (status, body) = send(app_without_model(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["message"], "Model not loaded");
}

#[tokio::test]
async fn predict_returns_full_result() {
    let request = post_json(json!({"url": "https://www.google.com"}).to_string());
    let (status, body) = send(app_with_model(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://www.google.com");
    assert_eq!(body["prediction"], "legitimate");
    assert_eq!(body["is_phishing"], false);

    let legitimate = body["probabilities"]["legitimate"].as_f64().unwrap();
    let phishing = body["probabilities"]["phishing"].as_f64().unwrap();
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((legitimate + phishing - 1.0).abs() < 1e-9);
    assert_eq!(confidence, legitimate.max(phishing));
    assert!(["low", "medium", "high"].contains(&body["risk_level"].as_str().unwrap()));

    assert_eq!(
        body["key_features"],
        json!({
            "url_length": 22,
            "has_https": true,
            "has_ip_address": false,
            "suspicious_symbols": 0,
            "sensitive_words": 0
        })
    );
}

#[tokio::test]
async fn predict_flags_lookalike_domain() {
    let url = "http://paypal-security-update.com.suspicious-domain.tk";
    let (status, body) = send(app_with_model(), post_json(json!({ "url": url }).to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "phishing");
    assert_eq!(body["is_phishing"], true);
    assert_eq!(body["key_features"]["has_https"], false);
    assert!(body["key_features"]["sensitive_words"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn predict_without_url_is_400() {
    let (status, body) = send(app_with_model(), post_json(r#"{"link": "http://a.com"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No URL provided", "status": 400}));

    let (status, body) = send(app_with_model(), post_json(r#"{"url": ""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No URL provided");
}

#[tokio::test]
async fn predict_with_bad_body_is_400() {
    for payload in ["{not json", "", "{}"] {
        let (status, body) = send(app_with_model(), post_json(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert_eq!(body["error"], "No JSON data provided");
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(Body::from(r#"{"url": "http://a.com"}"#))
        .unwrap();
    let (status, body) = send(app_with_model(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No JSON data provided");
}

#[tokio::test]
async fn predict_without_model_is_500() {
    let request = post_json(json!({"url": "http://a.com"}).to_string());
    let (status, body) = send(app_without_model(), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded", "status": 500}));

    // Reported before the body is looked at
    let (status, _) = send(app_without_model(), post_json("{}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn degraded_url_still_predicts() {
    let request = post_json(json!({"url": "http://[::1/login"}).to_string());
    let (status, body) = send(app_with_model(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key_features"]["url_length"], 0);
    assert_eq!(body["key_features"]["has_https"], false);
    assert!(body.get("degraded").is_none());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, body) = send(app_with_model(), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let response = app_with_model().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

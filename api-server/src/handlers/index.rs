//! Service banner

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::AppState;

#[derive(Serialize)]
pub struct IndexResponse {
    message: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
    model_status: &'static str,
    version: &'static str,
}

pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        ("/predict", "POST - Predict if a URL is phishing or legitimate"),
        ("/health", "GET - Check API health status"),
    ]);

    Json(IndexResponse {
        message: "Phishing URL Detection API is running",
        endpoints,
        model_status: if state.service.is_model_loaded() { "loaded" } else { "not_loaded" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

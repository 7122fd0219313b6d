//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    message: &'static str,
}

/// Always 200; a missing model shows up in the body only
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.service.is_model_loaded();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "unhealthy" },
        model_loaded,
        message: if model_loaded { "API is running correctly" } else { "Model not loaded" },
    })
}

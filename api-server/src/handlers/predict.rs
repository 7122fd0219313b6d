//! URL classification handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use phishguard_core::PredictionResult;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Pull a non-empty `url` out of the request body.
///
/// Unparseable bodies, non-objects and `{}` all count as "no JSON".
fn requested_url(payload: Result<Json<Value>, JsonRejection>) -> AppResult<String> {
    let body = match payload {
        Ok(Json(Value::Object(map))) if !map.is_empty() => map,
        Ok(_) => return Err(AppError::BadRequest("No JSON data provided".to_string())),
        Err(rejection) => {
            tracing::debug!("Rejected predict body: {}", rejection.body_text());
            return Err(AppError::BadRequest("No JSON data provided".to_string()));
        }
    };

    match body.get("url") {
        Some(Value::String(url)) if !url.is_empty() => Ok(url.clone()),
        _ => Err(AppError::BadRequest("No URL provided".to_string())),
    }
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictionResult>> {
    // A missing model wins over a bad request
    if !state.service.is_model_loaded() {
        return Err(AppError::ModelUnavailable);
    }

    let url = requested_url(payload)?;
    let result = state.service.predict(&url)?;

    tracing::info!(
        prediction = result.prediction.as_str(),
        confidence = result.confidence,
        risk_level = %result.risk_level,
        degraded = result.degraded.is_some(),
        "URL classified"
    );

    Ok(Json(result))
}

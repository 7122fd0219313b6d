//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use phishguard_core::PredictError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    BadRequest(String),
    NotFound(String),

    // Model errors
    ModelUnavailable,
    PredictionFailed(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ModelUnavailable | AppError::PredictionFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::ModelUnavailable => "Model not loaded".to_string(),
            AppError::PredictionFailed(msg) => format!("Prediction failed: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.message();

        match &self {
            AppError::PredictionFailed(_) => tracing::error!("{}", error_message),
            AppError::ModelUnavailable => tracing::warn!("Prediction requested without a model"),
            _ => tracing::debug!("Request rejected ({}): {}", status, error_message),
        }

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::ModelUnavailable => AppError::ModelUnavailable,
            PredictError::InvalidInput(msg) => AppError::BadRequest(msg),
            PredictError::Prediction(e) => AppError::PredictionFailed(e.to_string()),
            PredictError::Layout(e) => AppError::PredictionFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::ClassifierError;

    #[test]
    fn test_predict_error_mapping() {
        let err = AppError::from(PredictError::ModelUnavailable);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Model not loaded");

        let err = AppError::from(PredictError::InvalidInput("No URL provided".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No URL provided");

        let err = AppError::from(PredictError::Prediction(ClassifierError::Inference("nan".into())));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Prediction failed: inference failed: nan");

        let mismatch = phishguard_core::features::layout::validate_layout(0, 0).unwrap_err();
        let err = AppError::from(PredictError::Layout(mismatch));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Prediction failed: Feature layout mismatch"));
    }

    #[test]
    fn test_response_status() {
        let response = AppError::NotFound("Endpoint not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

//! HTTP handlers

pub mod health;
pub mod index;
pub mod predict;

use crate::error::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

//! PhishGuard API Server
//!
//! HTTP front end for the phishing URL classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   PHISHGUARD API                     │
//! ├──────────────────────────────────────────────────────┤
//! │  GET /  ·  GET /health  ·  POST /predict  (Axum)     │
//! │                        │                             │
//! │                        ▼                             │
//! │        PredictionService (phishguard-core)           │
//! │     extractor ──▶ Arc<dyn Classifier> ──▶ risk       │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use phishguard_core::PredictionService;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

//! PhishGuard Core
//!
//! URL feature extraction and phishing classification.
//!
//! # Architecture
//!
//! ```text
//!  URL string ──▶ UrlFeatureExtractor ──▶ FeatureVector (48 columns)
//!                                               │
//!                                               ▼
//!  PredictionResult ◀── risk tiering ◀── dyn Classifier (forest / ONNX)
//! ```

pub mod features;
pub mod model;
pub mod service;

pub use features::{extract_features, FeatureVector, UrlFeatureExtractor, FEATURE_COUNT};
pub use model::{load_classifier, Classifier, ClassifierError, LoadedModel, RiskLevel};
pub use service::{KeyFeatures, PredictError, PredictionResult, PredictionService, ServiceStatus};

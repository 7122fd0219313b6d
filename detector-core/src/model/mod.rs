//! Model Module - Classifier Backends
//!
//! Keeps inference separate from feature extraction so the backend can be
//! swapped without touching the feature schema.

pub mod classifier;
pub mod forest;
pub mod loader;
pub mod risk;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use classifier::{ClassLabel, ClassProbabilities, Classifier, ClassifierError};
pub use forest::ForestClassifier;
pub use loader::{load_classifier, LoadedModel, ModelFormat, ModelMetadata};
pub use risk::{RiskLevel, RiskThresholds};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

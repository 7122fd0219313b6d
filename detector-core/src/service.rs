//! Prediction Service
//!
//! Explicitly constructed context holding the loaded classifier. Handlers
//! receive it by reference; nothing reads a process-wide model.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::features::layout::{idx, LayoutMismatchError};
use crate::features::{FeatureVector, LayoutInfo, UrlFeatureExtractor};
use crate::model::{
    ClassLabel, ClassProbabilities, Classifier, ClassifierError, LoadedModel, ModelMetadata,
    RiskLevel, RiskThresholds,
};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ClassifierError),

    #[error("Prediction failed: {0}")]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Human-readable subset of the feature vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFeatures {
    pub url_length: u32,
    pub has_https: bool,
    pub has_ip_address: bool,
    /// `@` plus `~` presence
    pub suspicious_symbols: u32,
    pub sensitive_words: u32,
}

impl KeyFeatures {
    /// Degraded vectors report no HTTPS even though `NoHttps` reads 0
    pub fn from_vector(vector: &FeatureVector, degraded: bool) -> Self {
        let value = |i: usize| vector.get(i).unwrap_or(0.0);
        let count = |i: usize| value(i).max(0.0) as u32;

        Self {
            url_length: count(idx::URL_LENGTH),
            has_https: !degraded && value(idx::NO_HTTPS) == 0.0,
            has_ip_address: value(idx::IP_ADDRESS) != 0.0,
            suspicious_symbols: count(idx::AT_SYMBOL) + count(idx::TILDE_SYMBOL),
            sensitive_words: count(idx::NUM_SENSITIVE_WORDS),
        }
    }
}

/// Classifier verdict for a feature vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: ClassLabel,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub risk_level: RiskLevel,
}

impl Verdict {
    pub fn is_phishing(&self) -> bool {
        self.label.is_phishing()
    }
}

/// Per-request prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub url: String,
    pub prediction: ClassLabel,
    pub is_phishing: bool,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub risk_level: RiskLevel,
    pub key_features: KeyFeatures,
    /// Set when feature extraction fell back to the zero vector
    #[serde(skip)]
    pub degraded: Option<String>,
}

/// Health snapshot, independent of any request
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub model_loaded: bool,
    pub model: Option<ModelMetadata>,
    pub feature_layout: LayoutInfo,
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Clone)]
pub struct PredictionService {
    classifier: Option<Arc<dyn Classifier>>,
    metadata: Option<ModelMetadata>,
    extractor: UrlFeatureExtractor,
    thresholds: RiskThresholds,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("model_loaded", &self.is_model_loaded())
            .field("metadata", &self.metadata)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl PredictionService {
    pub fn new(classifier: Option<Arc<dyn Classifier>>, metadata: Option<ModelMetadata>) -> Self {
        Self {
            classifier,
            metadata,
            extractor: UrlFeatureExtractor::new(),
            thresholds: RiskThresholds::default(),
        }
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self::new(Some(classifier), None)
    }

    pub fn from_loaded(model: LoadedModel) -> Self {
        Self::new(Some(model.classifier), Some(model.metadata))
    }

    /// Service whose model failed to load; every prediction fails
    pub fn unavailable() -> Self {
        Self::new(None, None)
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            model_loaded: self.is_model_loaded(),
            model: self.metadata.clone(),
            feature_layout: LayoutInfo::current(),
        }
    }

    fn classifier(&self) -> Result<&Arc<dyn Classifier>, PredictError> {
        self.classifier.as_ref().ok_or(PredictError::ModelUnavailable)
    }

    /// Classify an already extracted vector
    pub fn predict_features(&self, features: &FeatureVector) -> Result<Verdict, PredictError> {
        let classifier = self.classifier()?;
        features.validate()?;

        let label = classifier.predict(features)?;
        let probabilities = classifier.predict_proba(features)?;
        let confidence = probabilities.confidence();

        Ok(Verdict {
            label,
            confidence,
            probabilities,
            risk_level: self.thresholds.classify(confidence),
        })
    }

    /// Classify a URL
    pub fn predict(&self, url: &str) -> Result<PredictionResult, PredictError> {
        // Model availability is reported before input problems
        self.classifier()?;

        if url.is_empty() {
            return Err(PredictError::InvalidInput("No URL provided".to_string()));
        }

        let extraction = self.extractor.extract(url);
        let verdict = self.predict_features(&extraction.vector)?;

        log::debug!(
            "Predicted {} ({:.3}, {}) for {:?}: {}",
            verdict.label.as_str(),
            verdict.confidence,
            verdict.risk_level,
            url,
            extraction.vector.to_log_entry()
        );

        Ok(PredictionResult {
            url: url.to_string(),
            prediction: verdict.label,
            is_phishing: verdict.is_phishing(),
            confidence: verdict.confidence,
            probabilities: verdict.probabilities,
            risk_level: verdict.risk_level,
            key_features: KeyFeatures::from_vector(&extraction.vector, extraction.is_degraded()),
            degraded: extraction.degraded,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Classifier contract
//!
//! Every backend exposes the same two calls a tabular model offers:
//! a hard label and the two class probabilities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::FeatureVector;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model artifact: {0}")]
    Format(String),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("unsupported model artifact: {0}")]
    Unsupported(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::Format(err.to_string())
    }
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Predicted class. Class index 1 is the positive (phishing) class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    Legitimate,
    Phishing,
}

impl ClassLabel {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(ClassLabel::Legitimate),
            1 => Some(ClassLabel::Phishing),
            _ => None,
        }
    }

    pub fn is_phishing(self) -> bool {
        self == ClassLabel::Phishing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassLabel::Legitimate => "legitimate",
            ClassLabel::Phishing => "phishing",
        }
    }
}

/// `[p_legitimate, p_phishing]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub legitimate: f64,
    pub phishing: f64,
}

impl ClassProbabilities {
    pub fn new(legitimate: f64, phishing: f64) -> Self {
        Self { legitimate, phishing }
    }

    /// Highest class probability
    pub fn confidence(&self) -> f64 {
        self.legitimate.max(self.phishing)
    }

    /// Most probable class; ties go to the first class
    pub fn argmax(&self) -> ClassLabel {
        if self.phishing > self.legitimate {
            ClassLabel::Phishing
        } else {
            ClassLabel::Legitimate
        }
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A loaded, immutable model shared across requests
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError>;

    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        Ok(self.predict_proba(features)?.argmax())
    }

    /// Short human-readable description for status output
    fn describe(&self) -> String;
}

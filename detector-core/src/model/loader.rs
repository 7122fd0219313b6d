//! Model artifact loading
//!
//! Reads the artifact once, records a checksum for status output and hands
//! back an immutable shared classifier.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, ClassifierError};
use super::forest::ForestClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFormat {
    ForestJson,
    Onnx,
}

impl ModelFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ClassifierError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(ModelFormat::ForestJson),
            Some("onnx") => Ok(ModelFormat::Onnx),
            _ => Err(ClassifierError::Unsupported(format!(
                "{} (expected a .json forest or .onnx model)",
                path.display()
            ))),
        }
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub format: ModelFormat,
    pub description: String,
    pub size_bytes: usize,
    /// Hex SHA-256 of the artifact bytes
    pub sha256: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// A classifier together with where it came from
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load a classifier artifact from disk
pub fn load_classifier(path: impl AsRef<Path>) -> Result<LoadedModel, ClassifierError> {
    let path = path.as_ref();
    log::info!("Loading classifier from: {}", path.display());

    let format = ModelFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;

    let classifier: Arc<dyn Classifier> = match format {
        ModelFormat::ForestJson => Arc::new(ForestClassifier::from_json_slice(&bytes)?),
        ModelFormat::Onnx => load_onnx(&bytes)?,
    };

    let metadata = ModelMetadata {
        model_path: path.display().to_string(),
        format,
        description: classifier.describe(),
        size_bytes: bytes.len(),
        sha256: sha256_hex(&bytes),
        loaded_at: chrono::Utc::now(),
    };

    log::info!(
        "Classifier loaded: {} (sha256 {})",
        metadata.description,
        &metadata.sha256[..12]
    );

    Ok(LoadedModel { classifier, metadata })
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8]) -> Result<Arc<dyn Classifier>, ClassifierError> {
    Ok(Arc::new(super::onnx::OnnxClassifier::from_bytes(bytes)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8]) -> Result<Arc<dyn Classifier>, ClassifierError> {
    Err(ClassifierError::Unsupported(
        "ONNX models need the `onnx` feature".to_string(),
    ))
}

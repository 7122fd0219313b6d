//! ONNX Runtime backend
//!
//! Expects a classifier exported with one `float[1, 48]` input and two
//! outputs: the int64 label first, then a `float[1, 2]` probability tensor
//! (export without a ZipMap so probabilities stay a plain tensor).

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{ClassLabel, ClassProbabilities, Classifier, ClassifierError};
use crate::features::{FeatureVector, FEATURE_COUNT};

pub struct OnnxClassifier {
    // `Session::run` takes `&mut self`
    session: Mutex<Session>,
    label_output: String,
    proba_output: String,
}

fn inference_err(context: &str, e: impl std::fmt::Display) -> ClassifierError {
    ClassifierError::Inference(format!("{}: {}", context, e))
}

impl OnnxClassifier {
    /// Build a session from model bytes
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ClassifierError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ClassifierError::Format(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifierError::Format(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ClassifierError::Format(format!("Load from memory error: {}", e)))?;

        if session.outputs.len() < 2 {
            return Err(ClassifierError::Invalid(format!(
                "expected label and probability outputs, model has {}",
                session.outputs.len()
            )));
        }
        let label_output = session.outputs[0].name.clone();
        let proba_output = session.outputs[1].name.clone();

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            proba_output,
        })
    }

    fn run(&self, features: &FeatureVector) -> Result<(ClassLabel, ClassProbabilities), ClassifierError> {
        let input = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.as_slice().to_vec())
            .map_err(|e| inference_err("Array error", e))?;
        let input_tensor = Value::from_array(input).map_err(|e| inference_err("Tensor error", e))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| inference_err("Inference failed", e))?;

        let label = outputs
            .get(&self.label_output)
            .ok_or_else(|| ClassifierError::Inference("missing label output".into()))?
            .try_extract_tensor::<i64>()
            .map_err(|e| inference_err("Label extract error", e))?
            .1
            .first()
            .copied()
            .and_then(ClassLabel::from_index)
            .ok_or_else(|| ClassifierError::Inference("label is not 0 or 1".into()))?;

        let proba = outputs
            .get(&self.proba_output)
            .ok_or_else(|| ClassifierError::Inference("missing probability output".into()))?
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_err("Probability extract error", e))?
            .1;
        if proba.len() < 2 {
            return Err(ClassifierError::Inference(format!(
                "expected 2 probabilities, got {}",
                proba.len()
            )));
        }

        Ok((label, ClassProbabilities::new(f64::from(proba[0]), f64::from(proba[1]))))
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        self.run(features).map(|(_, proba)| proba)
    }

    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        self.run(features).map(|(label, _)| label)
    }

    fn describe(&self) -> String {
        "ONNX Runtime (CPU)".to_string()
    }
}

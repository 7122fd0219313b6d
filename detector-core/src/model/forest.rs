//! Tree-ensemble classifier loaded from a JSON export
//!
//! The artifact mirrors the per-tree arrays of a trained random forest:
//!
//! ```json
//! {
//!   "n_features": 48,
//!   "classes": [0, 1],
//!   "trees": [{
//!     "children_left":  [1, -1, -1],
//!     "children_right": [2, -1, -1],
//!     "feature":        [14, -2, -2],
//!     "threshold":      [0.5, -2.0, -2.0],
//!     "value":          [[60.0, 40.0], [55.0, 5.0], [5.0, 35.0]]
//!   }]
//! }
//! ```
//!
//! A node is a leaf when its left child is negative. Splits go left when
//! `x[feature] <= threshold`, with the `f32` feature widened to `f64`.
//! Leaf weights may be raw counts or fractions; they are normalized on load.

use serde::Deserialize;

use super::classifier::{ClassProbabilities, Classifier, ClassifierError};
use crate::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// ARTIFACT SCHEMA
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForestArtifact {
    n_features: usize,
    #[serde(default = "default_classes")]
    classes: Vec<i64>,
    trees: Vec<TreeArtifact>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Deserialize)]
struct TreeArtifact {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

// ============================================================================
// RUNTIME REPRESENTATION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf([f64; 2]),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(index: usize, raw: TreeArtifact) -> Result<Self, ClassifierError> {
        let n = raw.children_left.len();
        let invalid = |msg: String| ClassifierError::Invalid(format!("tree {}: {}", index, msg));

        if n == 0 {
            return Err(invalid("no nodes".into()));
        }
        if raw.children_right.len() != n
            || raw.feature.len() != n
            || raw.threshold.len() != n
            || raw.value.len() != n
        {
            return Err(invalid("node arrays differ in length".into()));
        }

        let mut nodes = Vec::with_capacity(n);
        for node in 0..n {
            let left = raw.children_left[node];
            let right = raw.children_right[node];

            if left < 0 {
                nodes.push(Node::Leaf(normalize_leaf(&raw.value[node]).map_err(|e| {
                    invalid(format!("node {}: {}", node, e))
                })?));
                continue;
            }

            // Children come after their parent, so every walk terminates
            let child_ok = |c: i64| c > node as i64 && (c as usize) < n;
            if !child_ok(left) || !child_ok(right) {
                return Err(invalid(format!("node {} has out-of-order children", node)));
            }

            let feature = raw.feature[node];
            if feature < 0 || feature as usize >= FEATURE_COUNT {
                return Err(invalid(format!("node {} splits on feature {}", node, feature)));
            }

            let threshold = raw.threshold[node];
            if threshold.is_nan() {
                return Err(invalid(format!("node {} has NaN threshold", node)));
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold,
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_for(&self, values: &[f32; FEATURE_COUNT]) -> [f64; 2] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf(proba) => return *proba,
                Node::Split { feature, threshold, left, right } => {
                    node = if f64::from(values[*feature]) <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

fn normalize_leaf(weights: &[f64]) -> Result<[f64; 2], String> {
    if weights.len() != 2 {
        return Err(format!("expected 2 class weights, got {}", weights.len()));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err("class weights must be finite and non-negative".into());
    }
    let total = weights[0] + weights[1];
    if total <= 0.0 {
        return Err("class weights sum to zero".into());
    }
    Ok([weights[0] / total, weights[1] / total])
}

// ============================================================================
// FOREST CLASSIFIER
// ============================================================================

/// Random-forest style ensemble: class probabilities are the mean of the
/// per-tree leaf distributions.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    trees: Vec<Tree>,
}

impl ForestClassifier {
    /// Parse and validate a JSON artifact
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: ForestArtifact = serde_json::from_slice(bytes)?;

        if artifact.n_features != FEATURE_COUNT {
            return Err(ClassifierError::Invalid(format!(
                "model expects {} features, extractor produces {}",
                artifact.n_features, FEATURE_COUNT
            )));
        }
        if artifact.classes != [0, 1] {
            return Err(ClassifierError::Invalid(format!(
                "expected classes [0, 1], got {:?}",
                artifact.classes
            )));
        }
        if artifact.trees.is_empty() {
            return Err(ClassifierError::Invalid("forest has no trees".into()));
        }

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Tree::from_artifact(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for ForestClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        let values = features.as_array();
        let mut sum = [0.0f64; 2];

        for tree in &self.trees {
            let proba = tree.leaf_for(values);
            sum[0] += proba[0];
            sum[1] += proba[1];
        }

        let n = self.trees.len() as f64;
        Ok(ClassProbabilities::new(sum[0] / n, sum[1] / n))
    }

    fn describe(&self) -> String {
        format!("random forest ({} trees)", self.trees.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks
//!
//! Vectors are read-only outside this crate. The extractor fills them
//! through [`FeatureVectorBuilder`].

use serde::{Deserialize, Serialize};
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT,
    layout_hash, validate_layout, LayoutMismatchError,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    version: u8,
    layout_hash: u32,
    #[serde(with = "values_serde")]
    values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// All-zero vector with current version
    pub fn zeroed() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Iterate `(name, value)` pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": self.named_values()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

// serde only derives for arrays up to 32 elements
mod values_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use super::FEATURE_COUNT;

    pub fn serialize<S: Serializer>(values: &[f32; FEATURE_COUNT], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f32; FEATURE_COUNT], D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        let len = values.len();
        values
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"48 feature values"))
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with indexed setters
#[derive(Debug)]
pub struct FeatureVectorBuilder {
    values: [f32; FEATURE_COUNT],
}

// `Default` is only derived for arrays up to 32 elements
impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { values: [0.0; FEATURE_COUNT] }
    }

    /// Set a count or length field
    pub fn count(mut self, index: usize, value: usize) -> Self {
        if index < FEATURE_COUNT {
            self.values[index] = value as f32;
        }
        self
    }

    /// Set a 0/1 indicator field
    pub fn flag(mut self, index: usize, value: bool) -> Self {
        if index < FEATURE_COUNT {
            self.values[index] = if value { 1.0 } else { 0.0 };
        }
        self
    }

    pub fn build(self) -> FeatureVector {
        FeatureVector::from_values(self.values)
    }
}

// ============================================================================
// TESTS
// ============================================================================

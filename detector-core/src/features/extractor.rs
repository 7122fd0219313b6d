//! URL Feature Extractor
//!
//! Two stages:
//! - [`UrlFeatureExtractor::extract_strict`] splits the URL and runs every
//!   feature group. It can fail on a malformed authority.
//! - [`UrlFeatureExtractor::extract`] never fails. A strict-stage error is
//!   replaced by the all-zero vector and reported through
//!   [`Extraction::degraded`].

use serde::Serialize;
use thiserror::Error;

use super::lexical::LexicalFeatures;
use super::lexicon::LexiconFeatures;
use super::structure::StructureFeatures;
use super::url_parts::{self, UrlParts};
use super::vector::{FeatureVector, FeatureVectorBuilder};

// ============================================================================
// ERRORS
// ============================================================================

/// Strict-stage failure. Never reaches API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("invalid authority: {0}")]
    InvalidAuthority(String),
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Views of one URL shared by all feature groups
#[derive(Debug, Clone)]
pub struct UrlContext<'a> {
    /// Input exactly as received
    pub raw: &'a str,
    /// `raw` lowercased, for lexicon and pattern matching
    pub lowered: String,
    pub parts: UrlParts<'a>,
    /// Lowercased netloc
    pub hostname: String,
}

impl<'a> UrlContext<'a> {
    pub fn new(raw: &'a str, parts: UrlParts<'a>) -> Self {
        Self {
            raw,
            lowered: raw.to_lowercase(),
            hostname: parts.hostname(),
            parts,
        }
    }
}

// ============================================================================
// FEATURE GROUP TRAIT
// ============================================================================

/// A family of related features written into the vector
pub trait FeatureGroup {
    fn apply(&self, ctx: &UrlContext<'_>, builder: FeatureVectorBuilder) -> FeatureVectorBuilder;
}

// ============================================================================
// EXTRACTION RESULT
// ============================================================================

/// Output of the recovering extractor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub vector: FeatureVector,
    /// Why the strict stage failed, when the zero vector was substituted
    pub degraded: Option<String>,
}

impl Extraction {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Stateless URL → feature vector mapping
#[derive(Debug, Clone, Default)]
pub struct UrlFeatureExtractor {
    lexical: LexicalFeatures,
    structure: StructureFeatures,
    lexicon: LexiconFeatures,
}

impl UrlFeatureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every feature, failing on unparseable input
    pub fn extract_strict(&self, url: &str) -> Result<FeatureVector, ExtractionError> {
        if url.is_empty() {
            return Ok(FeatureVector::zeroed());
        }

        let cleaned = url_parts::sanitize(url);
        let parts = url_parts::split(&cleaned)?;
        let ctx = UrlContext::new(url, parts);

        let builder = FeatureVectorBuilder::new();
        let builder = self.lexical.apply(&ctx, builder);
        let builder = self.structure.apply(&ctx, builder);
        let builder = self.lexicon.apply(&ctx, builder);

        Ok(builder.build())
    }

    /// Compute every feature, substituting zeros on failure
    pub fn extract(&self, url: &str) -> Extraction {
        match self.extract_strict(url) {
            Ok(vector) => Extraction { vector, degraded: None },
            Err(e) => {
                log::warn!("Feature extraction degraded to zero vector: {}", e);
                log::debug!("Degraded input: {:?}", url);
                Extraction {
                    vector: FeatureVector::zeroed(),
                    degraded: Some(e.to_string()),
                }
            }
        }
    }
}

/// Extract the 48-feature vector for `url`. Never fails.
pub fn extract_features(url: &str) -> FeatureVector {
    UrlFeatureExtractor::new().extract(url).vector
}

//! Features Module - URL Feature Extraction Engine
//!
//! Turns arbitrary text into the fixed 48-column vector the phishing
//! classifier was trained on. Pure string analysis, no I/O.

pub mod layout;
pub mod vector;
pub mod url_parts;
pub mod extractor;
pub mod lexical;
pub mod structure;
pub mod lexicon;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, PAGE_CONTENT_FEATURES, LayoutInfo};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use extractor::{extract_features, Extraction, ExtractionError, FeatureGroup, UrlContext, UrlFeatureExtractor};

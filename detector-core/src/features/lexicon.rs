//! Lexicon Features - keyword lists and random-string heuristics
//!
//! Matching is plain substring search over the lowercased URL. Each word
//! counts once no matter how often it occurs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::extractor::{FeatureGroup, UrlContext};
use super::layout::idx;
use super::vector::FeatureVectorBuilder;

/// Words common in credential-harvesting URLs
///
/// `secur` is a stem so that "security" and "secured" count as well as "secure".
pub const SENSITIVE_WORDS: &[&str] = &[
    "secur", "account", "webscr", "login", "ebayisapi", "signin", "banking", "confirm",
];

/// Frequently impersonated brands
pub const BRAND_NAMES: &[&str] = &[
    "paypal", "ebay", "amazon", "google", "microsoft", "apple", "facebook", "twitter",
];

/// Letters then digits, or digits then letters
static RANDOM_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"[a-z]{8,}[0-9]{3,}").expect("valid random-string pattern"),
        Regex::new(r"[0-9]{4,}[a-z]{4,}").expect("valid random-string pattern"),
    ]
});

#[derive(Debug, Clone)]
pub struct LexiconFeatures {
    sensitive_words: &'static [&'static str],
    brand_names: &'static [&'static str],
}

impl LexiconFeatures {
    pub fn new() -> Self {
        Self {
            sensitive_words: SENSITIVE_WORDS,
            brand_names: BRAND_NAMES,
        }
    }

    /// Words from `lexicon` present in `lowered`
    pub fn matches<'w>(lowered: &str, lexicon: &[&'w str]) -> Vec<&'w str> {
        lexicon.iter().copied().filter(|word| lowered.contains(word)).collect()
    }
}

impl Default for LexiconFeatures {
    fn default() -> Self {
        Self::new()
    }
}

pub fn looks_random(lowered: &str) -> bool {
    RANDOM_PATTERNS.iter().any(|pattern| pattern.is_match(lowered))
}

impl FeatureGroup for LexiconFeatures {
    fn apply(&self, ctx: &UrlContext<'_>, builder: FeatureVectorBuilder) -> FeatureVectorBuilder {
        let lowered = ctx.lowered.as_str();

        builder
            .flag(idx::RANDOM_STRING, looks_random(lowered))
            .count(idx::NUM_SENSITIVE_WORDS, Self::matches(lowered, self.sensitive_words).len())
            .count(idx::EMBEDDED_BRAND_NAME, Self::matches(lowered, self.brand_names).len())
    }
}

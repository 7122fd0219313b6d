//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The classifier was trained against this exact column order. Any change
//! here silently rotates every column the model sees.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Lexical counts (0-13) ===
    "NumDots",                            // 0
    "SubdomainLevel",                     // 1
    "PathLevel",                          // 2
    "UrlLength",                          // 3
    "NumDash",                            // 4
    "NumDashInHostname",                  // 5
    "AtSymbol",                           // 6
    "TildeSymbol",                        // 7
    "NumUnderscore",                      // 8
    "NumPercent",                         // 9
    "NumQueryComponents",                 // 10
    "NumAmpersand",                       // 11
    "NumHash",                            // 12
    "NumNumericChars",                    // 13

    // === Structural indicators (14-23) ===
    "NoHttps",                            // 14
    "RandomString",                       // 15
    "IpAddress",                          // 16
    "DomainInSubdomains",                 // 17
    "DomainInPaths",                      // 18
    "HttpsInHostname",                    // 19
    "HostnameLength",                     // 20
    "PathLength",                         // 21
    "QueryLength",                        // 22
    "DoubleSlashInPath",                  // 23

    // === Lexicon matches (24-25) ===
    "NumSensitiveWords",                  // 24
    "EmbeddedBrandName",                  // 25

    // === Page content, not observable from the URL (26-41) ===
    "PctExtHyperlinks",                   // 26
    "PctExtResourceUrls",                 // 27
    "ExtFavicon",                         // 28
    "InsecureForms",                      // 29
    "RelativeFormAction",                 // 30
    "ExtFormAction",                      // 31
    "AbnormalFormAction",                 // 32
    "PctNullSelfRedirectHyperlinks",      // 33
    "FrequentDomainNameMismatch",         // 34
    "FakeLinkInStatusBar",                // 35
    "RightClickDisabled",                 // 36
    "PopUpWindow",                        // 37
    "SubmitInfoToEmail",                  // 38
    "IframeOrFrame",                      // 39
    "MissingTitle",                       // 40
    "ImagesOnlyInForm",                   // 41

    // === Runtime-derived (42-47) ===
    "SubdomainLevelRT",                   // 42
    "UrlLengthRT",                        // 43
    "PctExtResourceUrlsRT",               // 44
    "AbnormalExtFormActionR",             // 45
    "ExtMetaScriptLinkRT",                // 46
    "PctExtNullSelfRedirectHyperlinksRT", // 47
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 48;

/// Fields that need a rendered page to compute.
///
/// They stay at 0 for every input. The model was trained with the same
/// constant columns, so they are kept in place rather than dropped.
pub const PAGE_CONTENT_FEATURES: &[&str] = &[
    "PctExtHyperlinks",
    "PctExtResourceUrls",
    "ExtFavicon",
    "InsecureForms",
    "RelativeFormAction",
    "ExtFormAction",
    "AbnormalFormAction",
    "PctNullSelfRedirectHyperlinks",
    "FrequentDomainNameMismatch",
    "FakeLinkInStatusBar",
    "RightClickDisabled",
    "PopUpWindow",
    "SubmitInfoToEmail",
    "IframeOrFrame",
    "MissingTitle",
    "ImagesOnlyInForm",
    "PctExtResourceUrlsRT",
    "AbnormalExtFormActionR",
    "ExtMetaScriptLinkRT",
    "PctExtNullSelfRedirectHyperlinksRT",
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Named indices used by the extractor
pub mod idx {
    pub const NUM_DOTS: usize = 0;
    pub const SUBDOMAIN_LEVEL: usize = 1;
    pub const PATH_LEVEL: usize = 2;
    pub const URL_LENGTH: usize = 3;
    pub const NUM_DASH: usize = 4;
    pub const NUM_DASH_IN_HOSTNAME: usize = 5;
    pub const AT_SYMBOL: usize = 6;
    pub const TILDE_SYMBOL: usize = 7;
    pub const NUM_UNDERSCORE: usize = 8;
    pub const NUM_PERCENT: usize = 9;
    pub const NUM_QUERY_COMPONENTS: usize = 10;
    pub const NUM_AMPERSAND: usize = 11;
    pub const NUM_HASH: usize = 12;
    pub const NUM_NUMERIC_CHARS: usize = 13;
    pub const NO_HTTPS: usize = 14;
    pub const RANDOM_STRING: usize = 15;
    pub const IP_ADDRESS: usize = 16;
    pub const DOMAIN_IN_SUBDOMAINS: usize = 17;
    pub const DOMAIN_IN_PATHS: usize = 18;
    pub const HTTPS_IN_HOSTNAME: usize = 19;
    pub const HOSTNAME_LENGTH: usize = 20;
    pub const PATH_LENGTH: usize = 21;
    pub const QUERY_LENGTH: usize = 22;
    pub const DOUBLE_SLASH_IN_PATH: usize = 23;
    pub const NUM_SENSITIVE_WORDS: usize = 24;
    pub const EMBEDDED_BRAND_NAME: usize = 25;
    pub const SUBDOMAIN_LEVEL_RT: usize = 42;
    pub const URL_LENGTH_RT: usize = 43;
}

// ============================================================================
// TESTS
// ============================================================================

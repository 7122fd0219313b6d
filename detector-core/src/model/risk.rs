//! Risk Tiering
//!
//! Buckets prediction confidence into low / medium / high. Both cut points
//! are strict: a confidence equal to a cut point falls into the lower tier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Confidence must exceed this for `High`
    pub high: f64,
    /// Confidence must exceed this for `Medium`
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.6,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, confidence: f64) -> RiskLevel {
        if confidence > self.high {
            RiskLevel::High
        } else if confidence > self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

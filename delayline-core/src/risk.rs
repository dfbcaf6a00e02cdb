//! Delay risk tier classification
//!
//! Global invariants enforced:
//! - Deterministic classification
//! - Total over all probability inputs (no validation, no clamping)
//! - Monotonic non-decreasing in risk as probability increases

use serde::{Deserialize, Serialize};

/// Risk tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,    // < 0.40
    Medium, // 0.40 - 0.70
    High,   // >= 0.70
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

/// Configurable tier thresholds
///
/// Closed-open bands: `probability >= high` is High, `>= medium` is Medium,
/// everything below (including negatives) is Low.
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            medium: 0.40,
            high: 0.70,
        }
    }
}

/// Classify a delay probability with default thresholds
///
/// Out-of-range probabilities are classified with the same comparisons:
/// no error, no clamping.
pub fn classify(probability: f64) -> RiskTier {
    classify_with_thresholds(probability, &RiskThresholds::default())
}

/// Classify a delay probability with custom thresholds
pub fn classify_with_thresholds(probability: f64, thresholds: &RiskThresholds) -> RiskTier {
    if probability >= thresholds.high {
        RiskTier::High
    } else if probability >= thresholds.medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

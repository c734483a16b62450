//! Derived metrics over joined department data.
//!
//! Every derived value is `None` unless all of its inputs are present, finite,
//! and the denominator is non-zero. NaN and infinities never leave this module.
//! Nothing is rounded here; formatting happens at render time.

use serde::Serialize;

/// Score at or above which a department is flagged moderate risk.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.15;
/// Score at or above which a department is flagged high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.25;

/// `numerator / denominator`, or `None` when undefined.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// `(part_a + part_b) / total`, same policy as [`ratio`].
pub fn share(part_a: Option<f64>, part_b: Option<f64>, total: Option<f64>) -> Option<f64> {
    ratio(Some(part_a? + part_b?), total)
}

/// Widen an optional count for arithmetic.
pub fn as_f64(count: Option<u64>) -> Option<f64> {
    count.map(|c| c as f64)
}

/// Mean of the retiree ratio and the over-55 share; a missing factor counts as 0.
pub fn risk_score(retiree_ratio: Option<f64>, over55_share: Option<f64>) -> f64 {
    (retiree_ratio.unwrap_or(0.0) + over55_share.unwrap_or(0.0)) / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_score(score: f64) -> Self {
        if score < MODERATE_RISK_THRESHOLD {
            RiskTier::Low
        } else if score < HIGH_RISK_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Risque faible",
            RiskTier::Moderate => "Risque modéré",
            RiskTier::High => "Risque élevé",
        }
    }
}

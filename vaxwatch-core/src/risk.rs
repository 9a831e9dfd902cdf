//! Coverage-gap risk tier classification
//!
//! Global invariants enforced:
//! - Deterministic classification
//! - Boundaries inclusive on the lower tier

use serde::{Deserialize, Serialize};

/// Risk tier for a department
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Good,
    Warning,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Good => "good",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Configurable gap thresholds for the standalone risk tier
///
/// Independent from the composite status thresholds in `status` — the two
/// schemes coexist and are never reconciled.
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    /// Largest gap still classified Good
    pub good_max_gap: f64,
    /// Largest gap still classified Warning
    pub warning_max_gap: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            good_max_gap: 5.0,
            warning_max_gap: 15.0,
        }
    }
}

/// Classify the coverage gap with default thresholds
///
/// `gap = target - coverage`. Good when `gap <= 5`, Warning when
/// `5 < gap <= 15`, Critical when `gap > 15`. A negative gap (coverage
/// above target) is Good.
pub fn risk_level(coverage: f64, target: f64) -> RiskLevel {
    risk_level_with_thresholds(coverage, target, &RiskThresholds::default())
}

/// Classify the coverage gap with custom thresholds
pub fn risk_level_with_thresholds(
    coverage: f64,
    target: f64,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    let gap = target - coverage;
    if gap <= thresholds.good_max_gap {
        RiskLevel::Good
    } else if gap <= thresholds.warning_max_gap {
        RiskLevel::Warning
    } else {
        RiskLevel::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_gap_is_good() {
        assert_eq!(risk_level(70.0, 75.0), RiskLevel::Good);
        assert_eq!(risk_level(74.0, 75.0), RiskLevel::Good);
    }

    #[test]
    fn test_gap_boundaries_are_inclusive_on_the_lower_tier() {
        // gap exactly 5 stays Good
        assert_eq!(risk_level(70.0, 75.0), RiskLevel::Good);
        // gap exactly 15 stays Warning
        assert_eq!(risk_level(60.0, 75.0), RiskLevel::Warning);
    }

    #[test]
    fn test_mid_gap_is_warning() {
        assert_eq!(risk_level(65.0, 75.0), RiskLevel::Warning);
        assert_eq!(risk_level(62.0, 75.0), RiskLevel::Warning);
    }

    #[test]
    fn test_large_gap_is_critical() {
        assert_eq!(risk_level(58.7, 75.0), RiskLevel::Critical);
        assert_eq!(risk_level(54.3, 75.0), RiskLevel::Critical);
    }

    #[test]
    fn test_negative_gap_is_good() {
        assert_eq!(risk_level(72.1, 48.0), RiskLevel::Good);
    }

    #[test]
    fn test_custom_thresholds() {
        let tight = RiskThresholds {
            good_max_gap: 2.0,
            warning_max_gap: 8.0,
        };
        assert_eq!(
            risk_level_with_thresholds(70.0, 75.0, &tight),
            RiskLevel::Warning
        );
        assert_eq!(
            risk_level_with_thresholds(65.0, 75.0, &tight),
            RiskLevel::Critical
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::Warning);
        assert!(RiskLevel::Warning > RiskLevel::Good);
    }
}

//! Equity indicators - vaccination gap and vulnerability classification

use serde::{Deserialize, Serialize};

/// Vulnerability priority tier for a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnerabilityPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl VulnerabilityPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityPriority::Low => "low",
            VulnerabilityPriority::Medium => "medium",
            VulnerabilityPriority::High => "high",
            VulnerabilityPriority::Critical => "critical",
        }
    }
}

/// Vulnerability assessment for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VulnerabilityZone {
    pub department: String,
    /// 0-100 composite score, supplied by upstream analysis
    pub score: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub priority: VulnerabilityPriority,
}

/// Vaccination gap against the regional average
///
/// Negative when the department trails its region.
pub fn vac_gap(coverage: f64, regional_average: f64) -> f64 {
    coverage - regional_average
}

/// Classify a 0-100 vulnerability score into a priority tier
///
/// Score >= 80 Critical, >= 65 High, >= 50 Medium, below Low.
pub fn vulnerability_priority(score: f64) -> VulnerabilityPriority {
    if score >= 80.0 {
        VulnerabilityPriority::Critical
    } else if score >= 65.0 {
        VulnerabilityPriority::High
    } else if score >= 50.0 {
        VulnerabilityPriority::Medium
    } else {
        VulnerabilityPriority::Low
    }
}

/// Assemble a vulnerability zone, classifying its score
pub fn assess_zone(
    department: &str,
    score: f64,
    factors: Vec<String>,
    recommendations: Vec<String>,
) -> VulnerabilityZone {
    VulnerabilityZone {
        department: department.to_string(),
        score,
        factors,
        recommendations,
        priority: vulnerability_priority(score),
    }
}

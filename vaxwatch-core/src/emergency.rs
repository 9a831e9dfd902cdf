//! Emergency-activity threshold surveillance
//!
//! Checks per-age-group emergency indicator loads against their sanitary
//! alert thresholds. A load strictly above its threshold is an exceedance;
//! equality is still normal.

use serde::{Deserialize, Serialize};

/// Observed emergency load for one age group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AgeGroupLoad {
    /// Age bracket label, e.g. `65 ans ou plus`
    pub age_group: String,
    /// Sanitary alert threshold for this bracket
    pub threshold: f64,
    /// Current observed value
    pub current: f64,
}

/// Threshold check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdStatus {
    Normal,
    Exceeded,
}

impl ThresholdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdStatus::Normal => "normal",
            ThresholdStatus::Exceeded => "exceeded",
        }
    }
}

/// Threshold check result for one age group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ThresholdReport {
    pub age_group: String,
    pub threshold: f64,
    pub current: f64,
    pub status: ThresholdStatus,
    /// Amount above the threshold (0 when normal)
    pub excess: f64,
}

/// Check one age group against its threshold
pub fn evaluate_age_group(load: &AgeGroupLoad) -> ThresholdReport {
    let exceeded = load.current > load.threshold;
    ThresholdReport {
        age_group: load.age_group.clone(),
        threshold: load.threshold,
        current: load.current,
        status: if exceeded {
            ThresholdStatus::Exceeded
        } else {
            ThresholdStatus::Normal
        },
        excess: if exceeded {
            load.current - load.threshold
        } else {
            0.0
        },
    }
}

/// Check every age group, preserving input order
pub fn evaluate_age_groups(loads: &[AgeGroupLoad]) -> Vec<ThresholdReport> {
    loads.iter().map(evaluate_age_group).collect()
}

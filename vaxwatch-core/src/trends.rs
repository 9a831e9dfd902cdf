//! Weekly trend semantics over an in-memory record list
//!
//! Groups records into per-week national points and classifies the
//! week-over-week coverage movement. Operates on whatever multi-week
//! record list the caller supplies; nothing is persisted.
//!
//! Global invariants enforced:
//! - Deterministic ordering (campaign week order)
//! - Trends are derived, not stored

use crate::aggregates::weighted_coverage;
use crate::record::{week_sort_key, VaccinationRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Flat trend tolerance (epsilon)
const FLAT_TREND_EPSILON: f64 = 1e-9;

/// Week-over-week coverage movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

/// National aggregate point for one campaign week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendPoint {
    pub week: String,
    /// Population-weighted mean coverage
    pub coverage: f64,
    /// Doses administered
    pub doses: u64,
    /// Mean emergency-room visit rate
    pub emergency: f64,
}

/// Complete trend analysis over the supplied weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendsAnalysis {
    pub points: Vec<TrendPoint>,
    /// Latest-week coverage minus previous-week coverage (0 with one week)
    pub weekly_delta: f64,
    pub direction: TrendDirection,
}

impl TrendsAnalysis {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize trends analysis to JSON")
    }
}

/// Analyze weekly trends from a record list
///
/// Weeks appear in campaign order. Fewer than two weeks yield a Flat
/// direction and a zero delta.
pub fn analyze_trends(records: &[VaccinationRecord]) -> TrendsAnalysis {
    let mut weeks: Vec<&str> = records.iter().map(|r| r.week.as_str()).collect();
    weeks.sort_by_key(|w| week_sort_key(w));
    weeks.dedup();

    let points: Vec<TrendPoint> = weeks
        .iter()
        .map(|week| {
            let week_records: Vec<&VaccinationRecord> =
                records.iter().filter(|r| r.week == *week).collect();
            TrendPoint {
                week: (*week).to_string(),
                coverage: weighted_coverage(&week_records),
                doses: week_records.iter().map(|r| r.doses).sum(),
                emergency: mean_emergency_rate(&week_records),
            }
        })
        .collect();

    let weekly_delta = match points.len() {
        0 | 1 => 0.0,
        n => points[n - 1].coverage - points[n - 2].coverage,
    };

    let direction = if weekly_delta.abs() < FLAT_TREND_EPSILON {
        TrendDirection::Flat
    } else if weekly_delta > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Falling
    };

    TrendsAnalysis {
        points,
        weekly_delta,
        direction,
    }
}

/// Mean emergency-room visit rate (0 for an empty week)
fn mean_emergency_rate(records: &[&VaccinationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.emergency_rate).sum::<f64>() / records.len() as f64
}

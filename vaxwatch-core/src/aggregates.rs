//! Aggregation views - national overview derived from records
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (never stored, always computed)
//! - Deterministic results for a given record list

use crate::error::MetricsError;
use crate::record::{week_sort_key, VaccinationRecord};
use crate::risk::RiskLevel;
use crate::status::department_status;
use serde::{Deserialize, Serialize};

/// National overview for the latest reporting week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Overview {
    /// Population-weighted mean coverage over the latest week
    pub national_coverage: f64,
    /// Doses administered in the latest week
    pub total_doses: u64,
    /// Departments whose composite status is critical
    pub critical_departments: usize,
    /// Latest-week coverage minus previous-week coverage (0 with one week)
    pub weekly_trend: f64,
}

/// Compute the national overview from a (possibly multi-week) record list
///
/// The latest week feeds coverage, doses, and the critical count; the
/// weekly trend needs the previous week too and is 0 when absent.
pub fn compute_overview(records: &[VaccinationRecord]) -> Result<Overview, MetricsError> {
    let mut weeks: Vec<&str> = records.iter().map(|r| r.week.as_str()).collect();
    weeks.sort_by_key(|w| week_sort_key(w));
    weeks.dedup();

    let Some(latest) = weeks.last().copied() else {
        return Ok(Overview {
            national_coverage: 0.0,
            total_doses: 0,
            critical_departments: 0,
            weekly_trend: 0.0,
        });
    };
    let previous = weeks.len().checked_sub(2).map(|i| weeks[i]);

    let latest_records: Vec<&VaccinationRecord> =
        records.iter().filter(|r| r.week == latest).collect();

    let total_doses = latest_records.iter().map(|r| r.doses).sum();

    let mut critical_departments = 0;
    for record in &latest_records {
        if department_status(record)?.status == RiskLevel::Critical {
            critical_departments += 1;
        }
    }

    let latest_coverage = weighted_coverage(&latest_records);
    let weekly_trend = match previous {
        Some(previous) => {
            let previous_records: Vec<&VaccinationRecord> =
                records.iter().filter(|r| r.week == previous).collect();
            latest_coverage - weighted_coverage(&previous_records)
        }
        None => 0.0,
    };

    Ok(Overview {
        national_coverage: latest_coverage,
        total_doses,
        critical_departments,
        weekly_trend,
    })
}

/// Population-weighted mean coverage (0 when the population sums to 0)
pub fn weighted_coverage(records: &[&VaccinationRecord]) -> f64 {
    let total_population: u64 = records.iter().map(|r| r.population).sum();
    if total_population == 0 {
        return 0.0;
    }

    let weighted: f64 = records
        .iter()
        .map(|r| r.coverage * r.population as f64)
        .sum();
    weighted / total_population as f64
}

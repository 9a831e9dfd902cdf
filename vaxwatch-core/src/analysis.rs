//! Department evaluation pipeline
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Derived indicators are recomputed on every evaluation, never cached

use crate::config::ResolvedConfig;
use crate::metrics::{coverage_gap, stock_days};
use crate::record::{week_sort_key, VaccinationRecord};
use crate::risk::{risk_level_with_thresholds, RiskLevel, RiskThresholds};
use crate::status::{department_status_with_thresholds, DepartmentStatus, StatusThresholds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Evaluation filters (CLI flags override config file values)
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    /// Keep only departments with at least this coverage gap
    pub min_gap: Option<f64>,
    /// Keep only the N most severe departments
    pub top_n: Option<usize>,
}

/// Complete evaluation result for one department-week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DepartmentReport {
    pub week: String,
    pub department: String,
    pub coverage: f64,
    pub target: f64,
    pub doses: u64,
    pub population: u64,
    pub stock: f64,
    pub demand: f64,
    pub stock_days: f64,
    pub coverage_gap: f64,
    /// Standalone gap tier (5/15 thresholds)
    pub risk: RiskLevel,
    /// Composite status (5/8/20/10 thresholds) with message and action
    pub status: DepartmentStatus,
}

/// Evaluate records with default thresholds and no department filter
pub fn evaluate_records(
    records: &[VaccinationRecord],
    options: EvalOptions,
) -> Result<Vec<DepartmentReport>> {
    evaluate_with_config(records, options, None)
}

/// Evaluate records with an optional resolved configuration
///
/// Config supplies department include/exclude globs and threshold
/// overrides. A record with non-positive demand fails the whole
/// evaluation; errors carry the department and week for context.
pub fn evaluate_with_config(
    records: &[VaccinationRecord],
    options: EvalOptions,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<Vec<DepartmentReport>> {
    let risk_thresholds = resolved_config
        .map(|c| c.risk_thresholds)
        .unwrap_or_default();
    let status_thresholds = resolved_config
        .map(|c| c.status_thresholds)
        .unwrap_or_default();

    let mut reports = Vec::new();
    for record in records {
        if let Some(config) = resolved_config {
            if !config.should_include(&record.department) {
                continue;
            }
        }

        reports.push(
            evaluate_record(record, &risk_thresholds, &status_thresholds).with_context(|| {
                format!(
                    "failed to evaluate department {} (week {})",
                    record.department, record.week
                )
            })?,
        );
    }

    tracing::debug!(evaluated = reports.len(), "department evaluation complete");

    let sorted = sort_reports(reports);

    // Apply min_gap filter, then top_n
    let filtered: Vec<DepartmentReport> = if let Some(min_gap) = options.min_gap {
        sorted
            .into_iter()
            .filter(|r| r.coverage_gap >= min_gap)
            .collect()
    } else {
        sorted
    };

    let final_reports = if let Some(top_n) = options.top_n {
        filtered.into_iter().take(top_n).collect()
    } else {
        filtered
    };

    Ok(final_reports)
}

/// Evaluate a single record into a report
fn evaluate_record(
    record: &VaccinationRecord,
    risk_thresholds: &RiskThresholds,
    status_thresholds: &StatusThresholds,
) -> Result<DepartmentReport, crate::error::MetricsError> {
    let days = stock_days(record.stock, record.demand)?;
    let gap = coverage_gap(record.coverage, record.target);
    let risk = risk_level_with_thresholds(record.coverage, record.target, risk_thresholds);
    let status = department_status_with_thresholds(record, status_thresholds)?;

    Ok(DepartmentReport {
        week: record.week.clone(),
        department: record.department.clone(),
        coverage: record.coverage,
        target: record.target,
        doses: record.doses,
        population: record.population,
        stock: record.stock,
        demand: record.demand,
        stock_days: days,
        coverage_gap: gap,
        risk,
        status,
    })
}

/// Sort reports deterministically
pub fn sort_reports(mut reports: Vec<DepartmentReport>) -> Vec<DepartmentReport> {
    reports.sort_by(|a, b| {
        // 1. Status severity descending
        b.status
            .status
            .cmp(&a.status.status)
            // 2. Coverage gap descending
            .then_with(|| {
                b.coverage_gap
                    .partial_cmp(&a.coverage_gap)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            // 3. Week ascending (campaign order)
            .then_with(|| week_sort_key(&a.week).cmp(&week_sort_key(&b.week)))
            // 4. Department name ascending
            .then_with(|| a.department.cmp(&b.department))
    });
    reports
}

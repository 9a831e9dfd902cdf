//! Vaxwatch core library - vaccination campaign surveillance analytics

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Evaluation is strictly per-record
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Derived indicators are recomputed on every evaluation, never stored
// - Identical input yields byte-for-byte identical output

pub mod aggregates;
pub mod alerts;
pub mod analysis;
pub mod config;
pub mod dataset;
pub mod emergency;
pub mod equity;
pub mod error;
pub mod format;
pub mod metrics;
pub mod record;
pub mod report;
pub mod risk;
pub mod scenario;
pub mod status;
pub mod trends;

pub use analysis::{evaluate_records, evaluate_with_config, sort_reports, DepartmentReport, EvalOptions};
pub use config::ResolvedConfig;
pub use error::MetricsError;
pub use record::VaccinationRecord;
pub use report::{render_csv, render_json, render_summary, render_text};
pub use risk::RiskLevel;

use anyhow::Result;
use std::path::Path;

/// Load a dataset and evaluate it in one pass
///
/// Convenience entry point for callers that work from files: discovers and
/// loads every dataset file under `path`, applies the config's department
/// filter and thresholds, and returns both the raw records and the
/// evaluated reports.
pub fn analyze_dataset(
    path: &Path,
    options: EvalOptions,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<(Vec<VaccinationRecord>, Vec<DepartmentReport>)> {
    let records = dataset::load_dataset(path)?;
    let reports = evaluate_with_config(&records, options, resolved_config)?;
    Ok((records, reports))
}

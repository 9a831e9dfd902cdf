//! Derived metric computation
//!
//! Global invariants enforced:
//! - Pure functions over their inputs, no I/O and no shared state
//! - Stock-days is the only partial operation; everything else is total
//!   over the documented input ranges

use crate::error::MetricsError;

/// Days in one demand cycle
const DAYS_PER_WEEK: f64 = 7.0;

/// Estimate how many days the current stock lasts at the weekly demand rate
///
/// Formula: `round((stock / weekly_demand) * 7, 1 decimal)`, round half up.
///
/// `weekly_demand <= 0` makes the projection undefined and is rejected as
/// `InvalidInput` instead of producing infinity or NaN.
pub fn stock_days(stock: f64, weekly_demand: f64) -> Result<f64, MetricsError> {
    if weekly_demand <= 0.0 {
        return Err(MetricsError::InvalidInput {
            demand: weekly_demand,
        });
    }

    Ok(round1(stock / weekly_demand * DAYS_PER_WEEK))
}

/// Coverage gap: target percentage minus actual coverage percentage
///
/// Negative when coverage exceeds the target.
pub fn coverage_gap(coverage: f64, target: f64) -> f64 {
    target - coverage
}

/// Round to one decimal place, half up
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

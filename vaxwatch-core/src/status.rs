//! Composite department status classification
//!
//! Combines the stock-days projection and the coverage gap into a single
//! status with an operator-facing message and action. The 5/8/20/10
//! constants here are independent from the standalone risk tier thresholds
//! (5/15) and are deliberately not reconciled with them.

use crate::error::MetricsError;
use crate::metrics::{coverage_gap, stock_days};
use crate::record::VaccinationRecord;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Configurable thresholds for the composite status rule
#[derive(Debug, Clone, Copy)]
pub struct StatusThresholds {
    /// Below this many stock-days the department is critical
    pub critical_stock_days: f64,
    /// Below this many stock-days the department is at least warning
    pub warning_stock_days: f64,
    /// Above this coverage gap the department is critical
    pub critical_coverage_gap: f64,
    /// Above this coverage gap the department is at least warning
    pub warning_coverage_gap: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        StatusThresholds {
            critical_stock_days: 5.0,
            warning_stock_days: 8.0,
            critical_coverage_gap: 20.0,
            warning_coverage_gap: 10.0,
        }
    }
}

/// Status classification with operator-facing message and action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DepartmentStatus {
    pub status: RiskLevel,
    pub message: String,
    pub action: String,
}

/// Classify a department with default thresholds
///
/// Critical when `stock_days < 5` or `coverage_gap > 20`; warning when
/// `stock_days < 8` or `coverage_gap > 10`; good otherwise.
pub fn department_status(record: &VaccinationRecord) -> Result<DepartmentStatus, MetricsError> {
    department_status_with_thresholds(record, &StatusThresholds::default())
}

/// Classify a department with custom thresholds
pub fn department_status_with_thresholds(
    record: &VaccinationRecord,
    thresholds: &StatusThresholds,
) -> Result<DepartmentStatus, MetricsError> {
    let days = stock_days(record.stock, record.demand)?;
    let gap = coverage_gap(record.coverage, record.target);

    if days < thresholds.critical_stock_days || gap > thresholds.critical_coverage_gap {
        return Ok(DepartmentStatus {
            status: RiskLevel::Critical,
            message: format!("Stock critique ({days}j) ou couverture très faible"),
            action: "Intervention urgente requise".to_string(),
        });
    }

    if days < thresholds.warning_stock_days || gap > thresholds.warning_coverage_gap {
        return Ok(DepartmentStatus {
            status: RiskLevel::Warning,
            message: format!("Stock tendu ({days}j) ou couverture insuffisante"),
            action: "Planification des actions correctives".to_string(),
        });
    }

    Ok(DepartmentStatus {
        status: RiskLevel::Good,
        message: "Situation sous contrôle".to_string(),
        action: "Surveillance continue".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(coverage: f64, target: f64, stock: f64, demand: f64) -> VaccinationRecord {
        VaccinationRecord {
            week: "S47".to_string(),
            department: "Test".to_string(),
            coverage,
            doses: 0,
            target,
            population: 1_000_000,
            emergency_rate: 0.0,
            sos_rate: 0.0,
            stock,
            demand,
            ias: 0.5,
            density: 100.0,
        }
    }

    #[test]
    fn test_low_stock_days_is_critical() {
        // 18000/28000 * 7 = 4.5 days, below the 5-day floor
        let status = department_status(&record(54.3, 75.0, 18000.0, 28000.0)).unwrap();
        assert_eq!(status.status, RiskLevel::Critical);
        assert_eq!(
            status.message,
            "Stock critique (4.5j) ou couverture très faible"
        );
        assert_eq!(status.action, "Intervention urgente requise");
    }

    #[test]
    fn test_eight_day_boundary_is_warning() {
        // 52000/48000 * 7 = 7.6 days: below the 8-day warning floor even
        // though the coverage gap (2.9) is comfortable
        let status = department_status(&record(72.1, 75.0, 52000.0, 48000.0)).unwrap();
        assert_eq!(status.status, RiskLevel::Warning);
        assert_eq!(
            status.message,
            "Stock tendu (7.6j) ou couverture insuffisante"
        );
    }

    #[test]
    fn test_wide_coverage_gap_alone_is_critical() {
        // plenty of stock (14 days) but a 25-point gap
        let status = department_status(&record(50.0, 75.0, 56000.0, 28000.0)).unwrap();
        assert_eq!(status.status, RiskLevel::Critical);
    }

    #[test]
    fn test_moderate_gap_alone_is_warning() {
        // 14 days of stock, 12-point gap
        let status = department_status(&record(63.0, 75.0, 56000.0, 28000.0)).unwrap();
        assert_eq!(status.status, RiskLevel::Warning);
    }

    #[test]
    fn test_healthy_department_is_good() {
        // 14 days of stock, 3-point gap
        let status = department_status(&record(72.0, 75.0, 56000.0, 28000.0)).unwrap();
        assert_eq!(status.status, RiskLevel::Good);
        assert_eq!(status.message, "Situation sous contrôle");
        assert_eq!(status.action, "Surveillance continue");
    }

    #[test]
    fn test_integer_stock_days_formats_without_decimal() {
        // 28000/28000 * 7 = 7 days exactly
        let status = department_status(&record(72.0, 75.0, 28000.0, 28000.0)).unwrap();
        assert_eq!(
            status.message,
            "Stock tendu (7j) ou couverture insuffisante"
        );
    }

    #[test]
    fn test_zero_demand_propagates_invalid_input() {
        let err = department_status(&record(72.0, 75.0, 28000.0, 0.0)).unwrap_err();
        assert_eq!(err, MetricsError::InvalidInput { demand: 0.0 });
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = StatusThresholds {
            critical_stock_days: 10.0,
            warning_stock_days: 15.0,
            critical_coverage_gap: 5.0,
            warning_coverage_gap: 2.0,
        };
        // 14 days of stock and a 3-point gap is good by default, warning here
        let status =
            department_status_with_thresholds(&record(72.0, 75.0, 56000.0, 28000.0), &strict)
                .unwrap();
        assert_eq!(status.status, RiskLevel::Warning);
    }
}

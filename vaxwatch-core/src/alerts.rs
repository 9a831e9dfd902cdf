//! Active alert list derived from department statuses

use crate::analysis::DepartmentReport;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// One active alert for a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Alert {
    pub department: String,
    pub level: RiskLevel,
    pub message: String,
    pub action: String,
}

/// Build the active alert list from evaluated reports
///
/// Every non-good department produces one alert. Ordered by severity
/// descending, then department name ascending.
pub fn build_alerts(reports: &[DepartmentReport]) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = reports
        .iter()
        .filter(|r| r.status.status != RiskLevel::Good)
        .map(|r| Alert {
            department: r.department.clone(),
            level: r.status.status,
            message: r.status.message.clone(),
            action: r.status.action.clone(),
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then_with(|| a.department.cmp(&b.department))
    });

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{evaluate_records, EvalOptions};
    use crate::record::VaccinationRecord;

    fn record(department: &str, coverage: f64, target: f64, stock: f64, demand: f64) -> VaccinationRecord {
        VaccinationRecord {
            week: "S47".to_string(),
            department: department.to_string(),
            coverage,
            doses: 10_000,
            target,
            population: 1_000_000,
            emergency_rate: 1000.0,
            sos_rate: 3000.0,
            stock,
            demand,
            ias: 0.7,
            density: 3000.0,
        }
    }

    #[test]
    fn test_good_departments_raise_no_alert() {
        let records = vec![record("Paris", 72.0, 75.0, 56000.0, 28000.0)];
        let reports = evaluate_records(&records, EvalOptions::default()).unwrap();
        assert!(build_alerts(&reports).is_empty());
    }

    #[test]
    fn test_alerts_order_critical_first_then_name() {
        let records = vec![
            record("Toulouse", 68.9, 75.0, 32000.0, 38000.0),
            record("Nice", 54.3, 75.0, 18000.0, 28000.0),
            record("Lyon", 58.7, 75.0, 28000.0, 35000.0),
        ];
        let reports = evaluate_records(&records, EvalOptions::default()).unwrap();
        let alerts = build_alerts(&reports);

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].department, "Nice");
        assert_eq!(alerts[0].level, RiskLevel::Critical);
        assert_eq!(alerts[1].department, "Lyon");
        assert_eq!(alerts[2].department, "Toulouse");
    }

    #[test]
    fn test_alert_carries_status_message_and_action() {
        let records = vec![record("Nice", 54.3, 75.0, 18000.0, 28000.0)];
        let reports = evaluate_records(&records, EvalOptions::default()).unwrap();
        let alerts = build_alerts(&reports);

        assert_eq!(
            alerts[0].message,
            "Stock critique (4.5j) ou couverture très faible"
        );
        assert_eq!(alerts[0].action, "Intervention urgente requise");
    }
}

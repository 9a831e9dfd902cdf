//! Input record for one department and one reporting week
//!
//! Global invariants enforced:
//! - Records are immutable inputs, supplied externally per reporting week
//! - No derived values are stored on the record

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw per-department metrics for one campaign week
///
/// Field names serialize in camelCase to stay compatible with the legacy
/// JSON dataset format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    /// Campaign week label, e.g. `S47`
    pub week: String,
    pub department: String,
    /// Percentage of the target population vaccinated
    pub coverage: f64,
    /// Doses administered this week
    pub doses: u64,
    /// Coverage goal in percent
    pub target: f64,
    pub population: u64,
    /// Emergency-room visit rate (per 100k inhabitants)
    pub emergency_rate: f64,
    /// SOS-médecins consultation rate (per 100k inhabitants)
    pub sos_rate: f64,
    /// Doses on hand
    pub stock: f64,
    /// Doses required per week
    pub demand: f64,
    /// Severity/activity index, supplied by upstream analysis (opaque here)
    pub ias: f64,
    /// Inhabitants per km²
    pub density: f64,
}

/// Parse the numeric part of a campaign week label (`S47` -> 47)
///
/// Returns `None` for labels that do not match the `S<number>` form.
pub fn week_number(label: &str) -> Option<u32> {
    static WEEK_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let week_re = WEEK_RE.get_or_init(|| Regex::new(r"^S(\d{1,2})$").unwrap());

    week_re
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Deterministic ordering key for week labels
///
/// Orders parseable labels numerically; malformed labels sort after all
/// parseable ones, in ASCII lexical order.
pub fn week_sort_key(label: &str) -> (u32, String) {
    (
        week_number(label).unwrap_or(u32::MAX),
        label.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_number_parses_campaign_labels() {
        assert_eq!(week_number("S47"), Some(47));
        assert_eq!(week_number("S1"), Some(1));
        assert_eq!(week_number("S05"), Some(5));
    }

    #[test]
    fn test_week_number_rejects_malformed_labels() {
        assert_eq!(week_number("47"), None);
        assert_eq!(week_number("W47"), None);
        assert_eq!(week_number("S"), None);
        assert_eq!(week_number("S123"), None);
        assert_eq!(week_number(""), None);
    }

    #[test]
    fn test_week_sort_key_orders_numerically_then_lexically() {
        let mut labels = vec!["S9", "S40", "bad", "S10"];
        labels.sort_by_key(|l| week_sort_key(l));
        assert_eq!(labels, vec!["S9", "S10", "S40", "bad"]);
    }

    #[test]
    fn test_record_round_trips_camel_case_json() {
        let json = r#"{
            "week": "S47",
            "department": "Nice",
            "coverage": 54.3,
            "doses": 18000,
            "target": 75.0,
            "population": 1100000,
            "emergencyRate": 1600.0,
            "sosRate": 4200.0,
            "stock": 18000.0,
            "demand": 28000.0,
            "ias": 0.62,
            "density": 2800.0
        }"#;

        let record: VaccinationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.department, "Nice");
        assert_eq!(record.emergency_rate, 1600.0);

        let back = serde_json::to_string(&record).unwrap();
        assert!(back.contains("\"emergencyRate\""));
        assert!(back.contains("\"sosRate\""));
    }
}

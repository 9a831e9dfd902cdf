//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output for identical input
//! - CSV field order and decimal formatting match the legacy export

use crate::aggregates::Overview;
use crate::alerts::Alert;
use crate::analysis::DepartmentReport;
use crate::format::{format_number, format_percentage};
use crate::record::VaccinationRecord;
use crate::risk::RiskLevel;
use anyhow::{Context, Result};

/// Legacy export header row
const CSV_HEADERS: [&str; 12] = [
    "Semaine",
    "Département",
    "Couverture (%)",
    "Doses",
    "Objectif",
    "Population",
    "Taux Urgences",
    "Taux SOS",
    "Stock",
    "Demande",
    "IAS",
    "Densité",
];

/// Render reports as a fixed-width text table
pub fn render_text(reports: &[DepartmentReport]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:<10} {:<20} {:<6} {:>9} {:>7} {:>6} {:>5}\n",
        "STATUS", "RISK", "DEPARTMENT", "WEEK", "COVERAGE", "TARGET", "GAP", "DAYS"
    ));

    for report in reports {
        output.push_str(&format!(
            "{:<10} {:<10} {:<20} {:<6} {:>9} {:>7} {:>6} {:>5}\n",
            report.status.status.as_str(),
            report.risk.as_str(),
            truncate_or_pad(&report.department, 20),
            report.week,
            format!("{:.1}", report.coverage),
            format!("{:.1}", report.target),
            format!("{:.1}", report.coverage_gap),
            report.stock_days,
        ));
    }

    output
}

/// Render reports as JSON output
pub fn render_json(reports: &[DepartmentReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Render records in the legacy CSV export format
///
/// Coverage carries one decimal, IAS two, counts stay integral — byte
/// compatible with the historical dashboard export.
pub fn render_csv(records: &[VaccinationRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .context("failed to write CSV header")?;

    for record in records {
        let row: [String; 12] = [
            record.week.clone(),
            record.department.clone(),
            format!("{:.1}", record.coverage),
            record.doses.to_string(),
            record.target.to_string(),
            record.population.to_string(),
            record.emergency_rate.to_string(),
            record.sos_rate.to_string(),
            record.stock.to_string(),
            record.demand.to_string(),
            format!("{:.2}", record.ias),
            record.density.to_string(),
        ];
        writer
            .write_record(&row)
            .with_context(|| format!("failed to write CSV row for {}", record.department))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Render the French surveillance summary report
///
/// `generated_at` is supplied preformatted by the caller so rendering
/// stays deterministic.
pub fn render_summary(
    overview: &Overview,
    reports: &[DepartmentReport],
    alerts: &[Alert],
    generated_at: &str,
) -> String {
    let mut output = String::new();

    output.push_str("RAPPORT DE SURVEILLANCE VACCINATION GRIPPE\n");
    output.push_str("==========================================\n\n");

    output.push_str("SITUATION GÉNÉRALE:\n");
    output.push_str(&format!(
        "- Couverture nationale: {}\n",
        format_percentage(overview.national_coverage)
    ));
    output.push_str(&format!(
        "- Doses administrées: {}\n",
        format_number(overview.total_doses)
    ));
    output.push_str(&format!(
        "- Départements critiques: {}\n",
        overview.critical_departments
    ));
    let trend_sign = if overview.weekly_trend > 0.0 { "+" } else { "" };
    output.push_str(&format!(
        "- Tendance hebdomadaire: {}{}\n\n",
        trend_sign,
        format_percentage(overview.weekly_trend)
    ));

    output.push_str("DÉPARTEMENTS PRIORITAIRES:\n");
    for report in reports.iter().filter(|r| r.risk == RiskLevel::Critical) {
        output.push_str(&format!(
            "- {}: {} (objectif: {})\n",
            report.department,
            format_percentage(report.coverage),
            format_percentage(report.target)
        ));
    }
    output.push('\n');

    output.push_str("ALERTES ACTIVES:\n");
    for alert in alerts {
        output.push_str(&format!("- {}: {}\n", alert.department, alert.message));
    }
    output.push('\n');

    output.push_str("RECOMMANDATIONS:\n");
    output.push_str("1. Réapprovisionner les départements en situation critique\n");
    output.push_str("2. Renforcer les équipes dans les zones à faible couverture\n");
    output.push_str("3. Optimiser la distribution selon la demande prévue\n");
    output.push_str("4. Maintenir la surveillance des indicateurs d'urgence\n\n");

    output.push_str(&format!("Généré le: {generated_at}\n"));

    output
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::compute_overview;
    use crate::alerts::build_alerts;
    use crate::analysis::{evaluate_records, EvalOptions};

    fn nice_record() -> VaccinationRecord {
        VaccinationRecord {
            week: "S47".to_string(),
            department: "Nice".to_string(),
            coverage: 54.3,
            doses: 18000,
            target: 75.0,
            population: 1_100_000,
            emergency_rate: 1600.0,
            sos_rate: 4200.0,
            stock: 18000.0,
            demand: 28000.0,
            ias: 0.62,
            density: 2800.0,
        }
    }

    fn paris_record() -> VaccinationRecord {
        VaccinationRecord {
            week: "S47".to_string(),
            department: "Paris".to_string(),
            coverage: 72.0,
            doses: 45000,
            target: 75.0,
            population: 12_000_000,
            emergency_rate: 1250.0,
            sos_rate: 3200.0,
            stock: 56000.0,
            demand: 28000.0,
            ias: 0.85,
            density: 12000.0,
        }
    }

    #[test]
    fn test_csv_matches_the_legacy_export() {
        let output = render_csv(&[nice_record()]).unwrap();
        let expected = "\
Semaine,Département,Couverture (%),Doses,Objectif,Population,Taux Urgences,Taux SOS,Stock,Demande,IAS,Densité\n\
S47,Nice,54.3,18000,75,1100000,1600,4200,18000,28000,0.62,2800\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_text_table_has_header_and_rows() {
        let reports = evaluate_records(&[nice_record()], EvalOptions::default()).unwrap();
        let output = render_text(&reports);

        let mut lines = output.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("STATUS"));
        assert!(header.contains("COVERAGE"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("critical"));
        assert!(row.contains("Nice"));
        assert!(row.contains("4.5"));
    }

    #[test]
    fn test_json_round_trips_reports() {
        let reports = evaluate_records(&[nice_record()], EvalOptions::default()).unwrap();
        let json = render_json(&reports);
        let back: Vec<DepartmentReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reports);
    }

    #[test]
    fn test_summary_contains_every_section() {
        let records = vec![paris_record(), nice_record()];
        let reports = evaluate_records(&records, EvalOptions::default()).unwrap();
        let overview = compute_overview(&records).unwrap();
        let alerts = build_alerts(&reports);

        let summary = render_summary(&overview, &reports, &alerts, "21/11/2024 09:00");

        assert!(summary.starts_with("RAPPORT DE SURVEILLANCE VACCINATION GRIPPE\n"));
        assert!(summary.contains("SITUATION GÉNÉRALE:\n"));
        assert!(summary.contains("- Doses administrées: 63 000\n"));
        assert!(summary.contains("DÉPARTEMENTS PRIORITAIRES:\n- Nice: 54.3% (objectif: 75.0%)\n"));
        assert!(summary.contains("ALERTES ACTIVES:\n- Nice: Stock critique (4.5j) ou couverture très faible\n"));
        assert!(summary.contains("RECOMMANDATIONS:\n1. Réapprovisionner"));
        assert!(summary.ends_with("Généré le: 21/11/2024 09:00\n"));
    }

    #[test]
    fn test_summary_trend_sign_prefix() {
        let overview = Overview {
            national_coverage: 52.2,
            total_doses: 1_280_000,
            critical_departments: 2,
            weekly_trend: 2.1,
        };
        let summary = render_summary(&overview, &[], &[], "now");
        assert!(summary.contains("- Tendance hebdomadaire: +2.1%\n"));

        let falling = Overview {
            weekly_trend: -0.5,
            ..overview
        };
        let summary = render_summary(&falling, &[], &[], "now");
        assert!(summary.contains("- Tendance hebdomadaire: -0.5%\n"));
    }

    #[test]
    fn test_truncate_or_pad() {
        assert_eq!(truncate_or_pad("Nice", 6), "Nice  ");
        assert_eq!(truncate_or_pad("Saint-Pierre-et-Miquelon", 10), "Saint-P...");
    }
}

use chrono::NaiveDate;
use spint_reconcile::ReconciledRecord;
use spint_report::{Metric, ProtectionStatus, build_report, render_text};

fn record(plot: &str, variety: &str, purpose: &str, days: i64, rain: Option<f64>) -> ReconciledRecord {
    ReconciledRecord {
        plot: plot.to_string(),
        variety: variety.to_string(),
        purpose: purpose.to_string(),
        substance: "Score".to_string(),
        last_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        days_elapsed: days,
        interval_min: 7,
        interval_max: 10,
        rainfall_mm: rain,
        rain_min: 15.0,
        rain_max: 20.0,
    }
}

#[test]
fn statuses_across_both_grids() {
    let records = vec![
        record("Acker1", "Golden", "Apfelschorf", 3, Some(16.0)),
        record("Acker1", "Golden", "Bittersalz", 12, Some(25.0)),
        record("Acker2", "Gala", "Apfelschorf", 8, None),
    ];
    let now = NaiveDate::from_ymd_opt(2024, 5, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let report = build_report(&records, now);

    let days = report.grid(Metric::Days).unwrap();
    assert_eq!(days.purposes, vec!["Apfelschorf", "Bittersalz"]);
    assert_eq!(days.rows[0].cells["Apfelschorf"].status, ProtectionStatus::Protected);
    assert_eq!(days.rows[0].cells["Bittersalz"].status, ProtectionStatus::Expired);
    assert_eq!(days.rows[1].cells["Apfelschorf"].status, ProtectionStatus::Warning);
    assert!(!days.rows[1].cells.contains_key("Bittersalz"));

    let rain = report.grid(Metric::Rainfall).unwrap();
    assert_eq!(rain.rows[0].cells["Apfelschorf"].status, ProtectionStatus::Warning);
    assert_eq!(rain.rows[0].cells["Bittersalz"].display, "25.0 / 20.0 (Score)");
    assert_eq!(rain.rows[1].cells["Apfelschorf"].status, ProtectionStatus::Unknown);

    let text = render_text(&report);
    let header = text
        .lines()
        .find(|l| l.starts_with("Wiese"))
        .unwrap();
    assert!(header.contains("Apfelschorf"));
    assert!(header.contains("Bittersalz"));
}

//! Dominant-treatment resolution.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::record::ThresholdedTreatment;

/// Ranking key of a candidate treatment.
///
/// Sorting ascending puts the dominant candidate first: later date, then
/// higher rain maximum, then higher interval maximum, then substance name.
/// Thresholds are always present here because the merger fills defaults
/// before resolution.
#[derive(Debug, Clone, Copy)]
pub struct DominanceKey<'a> {
    pub last_date: NaiveDate,
    pub rain_max: f64,
    pub interval_max: u32,
    pub substance: &'a str,
}

impl<'a> DominanceKey<'a> {
    pub fn of(row: &'a ThresholdedTreatment) -> Self {
        Self {
            last_date: row.treatment.last_date,
            rain_max: row.rain_max,
            interval_max: row.interval_max,
            substance: &row.treatment.substance,
        }
    }
}

impl Ord for DominanceKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .last_date
            .cmp(&self.last_date)
            .then_with(|| other.rain_max.total_cmp(&self.rain_max))
            .then_with(|| other.interval_max.cmp(&self.interval_max))
            .then_with(|| self.substance.cmp(other.substance))
    }
}

impl PartialOrd for DominanceKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DominanceKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DominanceKey<'_> {}

/// Keeps the dominant candidate per (plot, variety, purpose).
///
/// The result does not depend on input order. Output is ordered by
/// (plot, variety, purpose).
pub fn resolve_dominant(rows: Vec<ThresholdedTreatment>) -> Vec<ThresholdedTreatment> {
    let n_candidates = rows.len();
    let mut best: BTreeMap<(String, String, String), ThresholdedTreatment> = BTreeMap::new();
    for row in rows {
        let key = (
            row.treatment.plot.clone(),
            row.treatment.variety.clone(),
            row.treatment.purpose.clone(),
        );
        match best.get_mut(&key) {
            Some(current) => {
                if DominanceKey::of(&row) < DominanceKey::of(current) {
                    debug!(
                        plot = %row.treatment.plot,
                        purpose = %row.treatment.purpose,
                        winner = %row.treatment.substance,
                        loser = %current.treatment.substance,
                        "dominant treatment replaced"
                    );
                    *current = row;
                }
            }
            None => {
                best.insert(key, row);
            }
        }
    }
    let out: Vec<ThresholdedTreatment> = best.into_values().collect();
    info!(n_candidates, n_resolved = out.len(), "resolved dominant treatments");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LastTreatment;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn row(substance: &str, day: u32, rain_max: f64, interval_max: u32) -> ThresholdedTreatment {
        ThresholdedTreatment {
            treatment: LastTreatment {
                plot: "A".to_string(),
                variety: "Gala".to_string(),
                substance: substance.to_string(),
                purpose: "Apfelschorf".to_string(),
                last_date: date(day),
                days_elapsed: 0,
            },
            rain_min: rain_max * 0.75,
            rain_max,
            interval_min: 5,
            interval_max,
        }
    }

    fn key(day: u32, rain: f64, interval: u32, substance: &str) -> DominanceKey<'_> {
        DominanceKey {
            last_date: date(day),
            rain_max: rain,
            interval_max: interval,
            substance,
        }
    }

    #[test]
    fn later_date_wins() {
        let out = resolve_dominant(vec![row("Delan WG", 1, 50.0, 20), row("Score", 3, 10.0, 7)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].treatment.substance, "Score");
    }

    #[test]
    fn same_date_higher_rain_wins() {
        let out = resolve_dominant(vec![row("Score", 1, 20.0, 14), row("Delan WG", 1, 35.0, 14)]);
        assert_eq!(out[0].treatment.substance, "Delan WG");
    }

    #[test]
    fn same_date_and_rain_higher_interval_wins() {
        let out = resolve_dominant(vec![row("Score", 1, 30.0, 14), row("Delan WG", 1, 30.0, 10)]);
        assert_eq!(out[0].treatment.substance, "Score");
    }

    #[test]
    fn full_tie_broken_by_substance() {
        let a = resolve_dominant(vec![row("Score", 1, 30.0, 14), row("Delan WG", 1, 30.0, 14)]);
        let b = resolve_dominant(vec![row("Delan WG", 1, 30.0, 14), row("Score", 1, 30.0, 14)]);
        assert_eq!(a[0].treatment.substance, "Delan WG");
        assert_eq!(b[0].treatment.substance, "Delan WG");
    }

    #[test]
    fn key_order_is_date_rain_interval_substance() {
        assert!(key(2, 0.0, 0, "Z") < key(1, 99.0, 99, "A"));
        assert!(key(1, 35.0, 0, "Z") < key(1, 20.0, 99, "A"));
        assert!(key(1, 20.0, 14, "Z") < key(1, 20.0, 10, "A"));
        assert!(key(1, 20.0, 14, "B") < key(1, 20.0, 14, "C"));
        assert_eq!(key(1, 20.0, 14, "B"), key(1, 20.0, 14, "B"));
    }

    #[test]
    fn default_filled_candidate_competes_on_values() {
        // a merger default (30 mm / 14 days) beats a weaker referenced row
        let out = resolve_dominant(vec![row("Neues Mittel", 1, 30.0, 14), row("Score", 1, 20.0, 14)]);
        assert_eq!(out[0].treatment.substance, "Neues Mittel");
    }

    #[test]
    fn purposes_kept_apart() {
        let mut other = row("Score", 1, 30.0, 14);
        other.treatment.purpose = "Apfelmehltau".to_string();
        let out = resolve_dominant(vec![row("Delan WG", 1, 30.0, 14), other]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].treatment.purpose, "Apfelmehltau");
    }
}

//! Threshold merging with default fallback.

use std::collections::BTreeSet;

use serde::Serialize;
use spint_reference::{ReferenceData, round_days, round_tenths};
use tracing::{info, warn};

use crate::config::ReconcileConfig;
use crate::record::{LastTreatment, ThresholdedTreatment};

/// Reference lookups that fell back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingReferenceReport {
    /// Substances without a rain-resistance row, sorted.
    pub rain_substances: Vec<String>,
    /// (substance, variety) pairs without an interval maximum, sorted.
    pub interval_pairs: Vec<(String, String)>,
}

impl MissingReferenceReport {
    /// Returns `true` when every lookup succeeded.
    pub fn is_empty(&self) -> bool {
        self.rain_substances.is_empty() && self.interval_pairs.is_empty()
    }
}

/// Attaches rain and interval thresholds to each last treatment.
///
/// Missing maxima take the configured defaults; missing minima are derived
/// from the maximum with `t1_factor`. Each kind of fallback is logged once.
pub fn merge_thresholds(
    treatments: Vec<LastTreatment>,
    refs: &ReferenceData,
    config: &ReconcileConfig,
) -> (Vec<ThresholdedTreatment>, MissingReferenceReport) {
    let t1 = config.t1_factor();
    let mut missing_rain = BTreeSet::new();
    let mut missing_interval = BTreeSet::new();

    let merged: Vec<ThresholdedTreatment> = treatments
        .into_iter()
        .map(|treatment| {
            let (rain_min, rain_max) = match refs.rain.get(&treatment.substance) {
                Some(r) => (r.min_mm, r.max_mm),
                None => {
                    missing_rain.insert(treatment.substance.clone());
                    let max = config.default_rain_mm();
                    (round_tenths(max * t1), max)
                }
            };

            let interval = refs.intervals.get(&treatment.substance, &treatment.variety);
            let interval_max = match interval.and_then(|i| i.max_days) {
                Some(max) => max,
                None => {
                    missing_interval.insert((treatment.substance.clone(), treatment.variety.clone()));
                    config.default_interval_days()
                }
            };
            let interval_min = interval
                .and_then(|i| i.min_days)
                .unwrap_or_else(|| round_days(f64::from(interval_max) * t1));

            ThresholdedTreatment {
                treatment,
                rain_min,
                rain_max,
                interval_min,
                interval_max,
            }
        })
        .collect();

    let report = MissingReferenceReport {
        rain_substances: missing_rain.into_iter().collect(),
        interval_pairs: missing_interval.into_iter().collect(),
    };
    if !report.rain_substances.is_empty() {
        warn!(
            substances = %report.rain_substances.join(", "),
            default_mm = config.default_rain_mm(),
            "no rain resistance for substances; using default"
        );
    }
    if !report.interval_pairs.is_empty() {
        let pairs: Vec<String> = report
            .interval_pairs
            .iter()
            .map(|(s, v)| format!("{s} / {v}"))
            .collect();
        warn!(
            pairs = %pairs.join(", "),
            default_days = config.default_interval_days(),
            "no treatment interval for substance/variety pairs; using default"
        );
    }
    info!(n_rows = merged.len(), "merged thresholds");
    (merged, report)
}

//! Cumulative rainfall since the last treatment.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use spint_calendar::start_of_day;
use spint_reference::round_tenths;
use tracing::{debug, info, warn};

use crate::record::{ReconciledRecord, ThresholdedTreatment, WeatherObservation};

/// Sorted prefix sums over precipitation readings.
///
/// Building sorts the readings once; each window sum is two binary searches.
#[derive(Debug, Clone, Default)]
pub struct RainfallIndex {
    timestamps: Vec<NaiveDateTime>,
    /// `prefix[i]` is the total of the first `i` readings.
    prefix: Vec<f64>,
}

impl RainfallIndex {
    /// Builds the index. Non-finite readings contribute zero.
    pub fn new(observations: &[WeatherObservation]) -> Self {
        let mut sorted: Vec<(NaiveDateTime, f64)> = observations
            .iter()
            .map(|o| {
                let mm = if o.precipitation_mm.is_finite() {
                    o.precipitation_mm
                } else {
                    0.0
                };
                (o.timestamp, mm)
            })
            .collect();
        sorted.sort_by_key(|&(ts, _)| ts);

        let mut prefix = Vec::with_capacity(sorted.len() + 1);
        prefix.push(0.0);
        let mut total = 0.0;
        for &(_, mm) in &sorted {
            total += mm;
            prefix.push(total);
        }
        Self {
            timestamps: sorted.into_iter().map(|(ts, _)| ts).collect(),
            prefix,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sum of readings with `start <= timestamp < end`, unrounded.
    pub fn sum_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        if start >= end {
            return 0.0;
        }
        let lo = self.timestamps.partition_point(|ts| *ts < start);
        let hi = self.timestamps.partition_point(|ts| *ts < end);
        self.prefix[hi] - self.prefix[lo]
    }
}

/// Rainfall since the start of each distinct last date, rounded to one
/// decimal.
///
/// Every value is `None` when `weather` is `None` or empty.
pub fn rainfall_by_date(
    dates: impl IntoIterator<Item = NaiveDate>,
    weather: Option<&[WeatherObservation]>,
    now: NaiveDateTime,
) -> BTreeMap<NaiveDate, Option<f64>> {
    let index = weather.filter(|w| !w.is_empty()).map(RainfallIndex::new);
    dates
        .into_iter()
        .map(|d| {
            let total = index
                .as_ref()
                .map(|idx| round_tenths(idx.sum_between(start_of_day(d), now)));
            (d, total)
        })
        .collect()
}

/// Attaches rainfall to each resolved treatment.
///
/// Output is ordered by (plot, variety, purpose).
pub fn attach_rainfall(
    rows: Vec<ThresholdedTreatment>,
    weather: Option<&[WeatherObservation]>,
    now: NaiveDateTime,
) -> Vec<ReconciledRecord> {
    let by_date = rainfall_by_date(rows.iter().map(|r| r.treatment.last_date), weather, now);
    match weather {
        Some(w) if !w.is_empty() => debug!(
            n_observations = w.len(),
            n_dates = by_date.len(),
            "summing rainfall windows"
        ),
        _ => warn!("weather data unavailable; rainfall left empty"),
    }

    let mut out: Vec<ReconciledRecord> = rows
        .into_iter()
        .map(|row| {
            let rainfall_mm = by_date.get(&row.treatment.last_date).copied().flatten();
            let t = row.treatment;
            ReconciledRecord {
                plot: t.plot,
                variety: t.variety,
                purpose: t.purpose,
                substance: t.substance,
                last_date: t.last_date,
                days_elapsed: t.days_elapsed,
                interval_min: row.interval_min,
                interval_max: row.interval_max,
                rainfall_mm,
                rain_min: row.rain_min,
                rain_max: row.rain_max,
            }
        })
        .collect();
    out.sort_by(|a, b| (&a.plot, &a.variety, &a.purpose).cmp(&(&b.plot, &b.variety, &b.purpose)));
    info!(n_records = out.len(), "attached rainfall");
    out
}

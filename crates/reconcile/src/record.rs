//! Records flowing between the reconciliation stages.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder for a plot, variety or substance that could not be read.
pub const UNKNOWN: &str = "Unbekannt";

/// One row of the treatment log before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTreatment {
    /// Plot description, e.g. `"Acker1 Golden 2023"`.
    pub plot_raw: String,
    pub substance: String,
    /// Comma-separated purposes.
    pub purpose_raw: String,
    pub date_raw: String,
}

impl RawTreatment {
    pub fn new(
        plot_raw: impl Into<String>,
        substance: impl Into<String>,
        purpose_raw: impl Into<String>,
        date_raw: impl Into<String>,
    ) -> Self {
        Self {
            plot_raw: plot_raw.into(),
            substance: substance.into(),
            purpose_raw: purpose_raw.into(),
            date_raw: date_raw.into(),
        }
    }
}

/// A normalized treatment for a single tracked purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentEvent {
    pub plot: String,
    pub variety: String,
    pub substance: String,
    pub purpose: String,
    pub date: NaiveDate,
}

/// Most recent treatment per (plot, variety, substance, purpose).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastTreatment {
    pub plot: String,
    pub variety: String,
    pub substance: String,
    pub purpose: String,
    pub last_date: NaiveDate,
    /// Whole days between the start of `last_date` and the reference
    /// instant. Negative for future-dated treatments.
    pub days_elapsed: i64,
}

/// A last treatment with all four thresholds filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdedTreatment {
    pub treatment: LastTreatment,
    pub rain_min: f64,
    pub rain_max: f64,
    pub interval_min: u32,
    pub interval_max: u32,
}

/// One precipitation reading in the local reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub timestamp: NaiveDateTime,
    pub precipitation_mm: f64,
}

impl WeatherObservation {
    pub fn new(timestamp: NaiveDateTime, precipitation_mm: f64) -> Self {
        Self {
            timestamp,
            precipitation_mm,
        }
    }
}

/// Reconciled protection status input for one (plot, variety, purpose).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    pub plot: String,
    pub variety: String,
    pub purpose: String,
    /// Substance of the dominant treatment.
    pub substance: String,
    pub last_date: NaiveDate,
    pub days_elapsed: i64,
    pub interval_min: u32,
    pub interval_max: u32,
    /// Rain since the start of `last_date`; `None` when no weather data was
    /// available.
    pub rainfall_mm: Option<f64>,
    pub rain_min: f64,
    pub rain_max: f64,
}

//! End-to-end reconciliation.

use chrono::NaiveDateTime;
use serde::Serialize;
use spint_reference::ReferenceData;
use tracing::info;

use crate::aggregate::last_treatments;
use crate::config::ReconcileConfig;
use crate::error::ProcessingError;
use crate::merge::{MissingReferenceReport, merge_thresholds};
use crate::normalize::{NormalizeStats, Normalizer};
use crate::rainfall::attach_rainfall;
use crate::record::{RawTreatment, ReconciledRecord, WeatherObservation};
use crate::resolve::resolve_dominant;

/// Counters for one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub normalize: NormalizeStats,
    /// Distinct (plot, variety, substance, purpose) groups.
    pub n_candidates: usize,
    pub n_records: usize,
    pub weather_available: bool,
    pub n_observations: usize,
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconcileOutcome {
    /// One record per (plot, variety, purpose), ordered by that key.
    pub records: Vec<ReconciledRecord>,
    pub missing: MissingReferenceReport,
    pub stats: RunStats,
}

/// Runs normalization, aggregation, threshold merging, dominance
/// resolution and rainfall aggregation against one captured `now`.
///
/// `weather = None` marks weather data as unavailable; every rainfall value
/// is then `None`.
///
/// # Errors
///
/// Returns [`ProcessingError`] if the configuration is invalid or an event
/// lacks a grouping field.
pub fn reconcile(
    raw: Vec<RawTreatment>,
    weather: Option<&[WeatherObservation]>,
    refs: &ReferenceData,
    config: &ReconcileConfig,
    now: NaiveDateTime,
) -> Result<ReconcileOutcome, ProcessingError> {
    let normalizer = Normalizer::new(config)?;
    let (events, normalize) = normalizer.normalize(raw);

    let last = last_treatments(events, now)?;
    let n_candidates = last.len();
    let (merged, missing) = merge_thresholds(last, refs, config);
    let resolved = resolve_dominant(merged);
    let records = attach_rainfall(resolved, weather, now);

    let n_observations = weather.map_or(0, <[WeatherObservation]>::len);
    let stats = RunStats {
        normalize,
        n_candidates,
        n_records: records.len(),
        weather_available: n_observations > 0,
        n_observations,
    };
    info!(
        n_records = stats.n_records,
        n_candidates,
        weather_available = stats.weather_available,
        now = %now,
        "reconciliation complete"
    );
    Ok(ReconcileOutcome {
        records,
        missing,
        stats,
    })
}

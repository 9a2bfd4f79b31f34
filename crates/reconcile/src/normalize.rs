//! Treatment normalization: raw log rows to per-purpose events.

use regex::Regex;
use serde::Serialize;
use spint_calendar::parse_date;
use tracing::{debug, info, warn};

use crate::config::ReconcileConfig;
use crate::error::ProcessingError;
use crate::record::{RawTreatment, TreatmentEvent, UNKNOWN};

/// Text between the plot token and an optional trailing year.
const VARIETY_PATTERN: &str = r"\s(.+?)\s*(?:\b[12]\d{3}\b|$)";

/// Counters collected while normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Raw rows read.
    pub n_raw: usize,
    /// Rows dropped because the date did not parse.
    pub dropped_dates: usize,
    /// Rows whose purpose was forced by a substance override.
    pub overridden: usize,
    /// Purpose tokens outside the tracked set.
    pub discarded_purposes: usize,
    /// Events emitted.
    pub n_events: usize,
}

/// Converts raw treatment rows into [`TreatmentEvent`]s.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    config: &'a ReconcileConfig,
    variety_re: Regex,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidConfig`] if the configuration is
    /// invalid.
    pub fn new(config: &'a ReconcileConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        let variety_re = Regex::new(VARIETY_PATTERN).map_err(|e| ProcessingError::InvalidConfig {
            reason: format!("variety pattern: {e}"),
        })?;
        Ok(Self { config, variety_re })
    }

    /// Splits a plot description into `(plot, variety)`.
    ///
    /// Rewrites are applied first, then the plot is the first whitespace
    /// token and the variety the text up to a trailing year.
    pub fn split_plot(&self, plot_raw: &str) -> (String, String) {
        let mut text = plot_raw.to_string();
        for (from, to) in self.config.plot_rewrites() {
            if !from.is_empty() {
                text = text.replace(from.as_str(), to);
            }
        }
        let plot = text
            .split_whitespace()
            .next()
            .map_or_else(|| UNKNOWN.to_string(), str::to_string);
        let variety = self
            .variety_re
            .captures(&text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .map_or_else(|| UNKNOWN.to_string(), str::to_string);
        (plot, variety)
    }

    /// Normalizes one batch of raw rows.
    ///
    /// Never fails: unparsable dates are dropped and counted, untracked
    /// purposes are discarded and counted.
    pub fn normalize(&self, raw: Vec<RawTreatment>) -> (Vec<TreatmentEvent>, NormalizeStats) {
        let mut stats = NormalizeStats {
            n_raw: raw.len(),
            ..NormalizeStats::default()
        };
        let mut events = Vec::with_capacity(raw.len());

        for row in raw {
            let Ok(date) = parse_date(&row.date_raw, self.config.date_format()) else {
                stats.dropped_dates += 1;
                continue;
            };

            let substance = match row.substance.trim() {
                "" => UNKNOWN.to_string(),
                s => s.to_string(),
            };
            let purpose_raw = match self.config.purpose_override(&substance) {
                Some(forced) => {
                    stats.overridden += 1;
                    forced.to_string()
                }
                None => row.purpose_raw,
            };

            let (plot, variety) = self.split_plot(&row.plot_raw);

            for token in purpose_raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                if !self.config.relevant_purposes().contains(token) {
                    stats.discarded_purposes += 1;
                    continue;
                }
                events.push(TreatmentEvent {
                    plot: plot.clone(),
                    variety: variety.clone(),
                    substance: substance.clone(),
                    purpose: token.to_string(),
                    date,
                });
            }
        }

        stats.n_events = events.len();
        if stats.dropped_dates > 0 {
            warn!(
                dropped = stats.dropped_dates,
                format = self.config.date_format(),
                "treatment rows with unparsable dates dropped"
            );
        }
        debug!(
            overridden = stats.overridden,
            discarded_purposes = stats.discarded_purposes,
            "purpose normalization"
        );
        info!(n_raw = stats.n_raw, n_events = stats.n_events, "normalized treatments");
        (events, stats)
    }
}

/// Normalizes raw rows with a fresh [`Normalizer`].
///
/// # Errors
///
/// Returns [`ProcessingError::InvalidConfig`] if the configuration is
/// invalid.
pub fn normalize(
    raw: Vec<RawTreatment>,
    config: &ReconcileConfig,
) -> Result<(Vec<TreatmentEvent>, NormalizeStats), ProcessingError> {
    Ok(Normalizer::new(config)?.normalize(raw))
}

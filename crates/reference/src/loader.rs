//! Assembly of all reference data for one run.

use tracing::info;

use crate::config::ReferenceConfig;
use crate::error::ReferenceDataError;
use crate::interval::{IntervalTable, derive_intervals};
use crate::rain::{RainResistanceTable, load_rain_resistance};
use crate::susceptibility::{SusceptibilityMap, load_susceptibility};
use crate::table::Table;

/// Reference thresholds used by the threshold merger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    /// Rain-resistance thresholds per substance.
    pub rain: RainResistanceTable,
    /// Variety susceptibility tiers.
    pub susceptibility: SusceptibilityMap,
    /// Treatment intervals per (substance, variety) for the active season.
    pub intervals: IntervalTable,
}

/// Validates and derives every reference table.
///
/// # Errors
///
/// Returns [`ReferenceDataError`] if the configuration is invalid or any
/// table is malformed.
pub fn load_reference_data(
    rain: &Table,
    susceptibility: &Table,
    interval: &Table,
    config: &ReferenceConfig,
) -> Result<ReferenceData, ReferenceDataError> {
    config.validate()?;

    let rain = load_rain_resistance(rain, config.t1_factor())?;
    let susceptibility = load_susceptibility(susceptibility)?;
    let intervals = derive_intervals(
        interval,
        &susceptibility,
        config.season(),
        config.season_specific_substances(),
        config.tier_columns(),
    )?;

    info!(
        n_rain = rain.len(),
        n_varieties = susceptibility.len(),
        n_intervals = intervals.len(),
        season = %config.season(),
        "reference data loaded"
    );
    Ok(ReferenceData {
        rain,
        susceptibility,
        intervals,
    })
}

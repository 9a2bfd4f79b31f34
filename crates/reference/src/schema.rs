//! Column names of the reference tables.

/// Substance name (all tables).
pub const SUBSTANCE: &str = "Mittel";
/// Maximum rain resistance in mm.
pub const RAIN_RESISTANCE: &str = "Regenbestaendigkeit";
/// Optional independently supplied minimum rain resistance in mm.
pub const RAIN_RESISTANCE_MIN: &str = "Regenbestaendigkeit_min";
/// Variety name.
pub const VARIETY: &str = "Sorte";
/// Susceptibility tier of a variety.
pub const SUSCEPTIBILITY: &str = "Mehltauanfälligkeit";
/// Season label of an interval row.
pub const SEASON: &str = "Jahreszeit";
/// `min` / `max` discriminator of an interval row.
pub const RANGE: &str = "Range";

/// Logical table names used in diagnostics.
pub mod tables {
    /// Rain-resistance thresholds per substance.
    pub const RAIN_RESISTANCE: &str = "regenbestaendigkeit";
    /// Variety susceptibility classification.
    pub const SUSCEPTIBILITY: &str = "sortenanfaelligkeit";
    /// Season-dependent treatment intervals, wide format.
    pub const INTERVAL: &str = "behandlungsintervall";
}

//! Rain-resistance thresholds per substance.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ReferenceDataError;
use crate::rounding::round_tenths;
use crate::schema;
use crate::table::Table;

/// Rain-resistance thresholds for one substance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainResistanceRef {
    pub substance: String,
    pub min_mm: f64,
    pub max_mm: f64,
}

/// Rain-resistance thresholds keyed by substance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RainResistanceTable {
    by_substance: BTreeMap<String, RainResistanceRef>,
}

impl RainResistanceTable {
    /// Builds a table from rows; the first row per substance wins.
    pub fn from_refs(refs: impl IntoIterator<Item = RainResistanceRef>) -> Self {
        let mut by_substance = BTreeMap::new();
        for r in refs {
            by_substance.entry(r.substance.clone()).or_insert(r);
        }
        Self { by_substance }
    }

    /// Looks up the thresholds for a substance.
    pub fn get(&self, substance: &str) -> Option<&RainResistanceRef> {
        self.by_substance.get(substance)
    }

    /// Number of substances with thresholds.
    pub fn len(&self) -> usize {
        self.by_substance.len()
    }

    /// Returns `true` when no substance has thresholds.
    pub fn is_empty(&self) -> bool {
        self.by_substance.is_empty()
    }

    /// Iterates rows in substance order.
    pub fn iter(&self) -> impl Iterator<Item = &RainResistanceRef> {
        self.by_substance.values()
    }
}

/// Parses the rain-resistance table.
///
/// `min_mm` comes from the optional `Regenbestaendigkeit_min` column when it
/// holds a value, otherwise it is `max_mm * t1_factor` rounded to one
/// decimal. Rows with an empty maximum are skipped so the substance falls
/// back to defaults downstream.
///
/// # Errors
///
/// Returns [`ReferenceDataError::MissingColumns`] if `Mittel` or
/// `Regenbestaendigkeit` is absent, or
/// [`ReferenceDataError::InvalidNumber`] for unparsable or negative values.
pub fn load_rain_resistance(
    table: &Table,
    t1_factor: f64,
) -> Result<RainResistanceTable, ReferenceDataError> {
    let [substance_col, max_col] = table.require_columns([schema::SUBSTANCE, schema::RAIN_RESISTANCE])?;
    let min_col = table.column(schema::RAIN_RESISTANCE_MIN);

    let mut refs = Vec::with_capacity(table.n_rows());
    let mut skipped = 0usize;
    for row in 0..table.n_rows() {
        let substance = table.cell(row, substance_col);
        if substance.is_empty() {
            skipped += 1;
            continue;
        }
        let Some(max_mm) = table.number(row, max_col)? else {
            skipped += 1;
            continue;
        };
        if max_mm < 0.0 {
            return Err(table.invalid_number(row, max_col));
        }
        let supplied_min = match min_col {
            Some(col) => table.number(row, col)?,
            None => None,
        };
        let min_mm = supplied_min.unwrap_or_else(|| round_tenths(max_mm * t1_factor));
        refs.push(RainResistanceRef {
            substance: substance.to_string(),
            min_mm,
            max_mm,
        });
    }

    let n_rows = refs.len();
    let parsed = RainResistanceTable::from_refs(refs);
    if parsed.len() < n_rows {
        warn!(
            duplicates = n_rows - parsed.len(),
            "duplicate substances in rain-resistance table; keeping first occurrence"
        );
    }
    if skipped > 0 {
        warn!(skipped, "rain-resistance rows without substance or value skipped");
    }
    info!(n_substances = parsed.len(), "loaded rain-resistance thresholds");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn min_derived_from_t1_factor() {
        let table = Table::new(
            "regen",
            s(&["Mittel", "Regenbestaendigkeit"]),
            vec![s(&["Delan WG", "40"]), s(&["Score", "25"])],
        );
        let refs = load_rain_resistance(&table, 0.75).unwrap();
        let delan = refs.get("Delan WG").unwrap();
        assert_relative_eq!(delan.max_mm, 40.0);
        assert_relative_eq!(delan.min_mm, 30.0);
        assert_relative_eq!(refs.get("Score").unwrap().min_mm, 18.8);
    }

    #[test]
    fn supplied_min_wins() {
        let table = Table::new(
            "regen",
            s(&["Mittel", "Regenbestaendigkeit", "Regenbestaendigkeit_min"]),
            vec![s(&["Delan WG", "40", "20"]), s(&["Score", "20", ""])],
        );
        let refs = load_rain_resistance(&table, 0.75).unwrap();
        assert_relative_eq!(refs.get("Delan WG").unwrap().min_mm, 20.0);
        assert_relative_eq!(refs.get("Score").unwrap().min_mm, 15.0);
    }

    #[test]
    fn first_duplicate_wins() {
        let table = Table::new(
            "regen",
            s(&["Mittel", "Regenbestaendigkeit"]),
            vec![s(&["Delan WG", "40"]), s(&["Delan WG", "10"])],
        );
        let refs = load_rain_resistance(&table, 0.75).unwrap();
        assert_eq!(refs.len(), 1);
        assert_relative_eq!(refs.get("Delan WG").unwrap().max_mm, 40.0);
    }

    #[test]
    fn empty_value_skipped() {
        let table = Table::new(
            "regen",
            s(&["Mittel", "Regenbestaendigkeit"]),
            vec![s(&["Delan WG", ""]), s(&["", "12"])],
        );
        assert!(load_rain_resistance(&table, 0.75).unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_fatal() {
        let table = Table::new("regen", s(&["Mittel", "mm"]), vec![]);
        let err = load_rain_resistance(&table, 0.75).unwrap_err();
        assert!(matches!(err, ReferenceDataError::MissingColumns { .. }));
    }

    #[test]
    fn negative_value_is_fatal() {
        let table = Table::new(
            "regen",
            s(&["Mittel", "Regenbestaendigkeit"]),
            vec![s(&["Delan WG", "-4"])],
        );
        let err = load_rain_resistance(&table, 0.75).unwrap_err();
        assert!(matches!(err, ReferenceDataError::InvalidNumber { row: 1, .. }));
    }
}

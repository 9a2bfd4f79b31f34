//! Season-dependent treatment intervals.
//!
//! The interval table is wide: one row per (substance, season, range) and one
//! column per susceptibility tier. Derivation runs in four steps:
//!
//! 1. keep rows admitted by the [`SeasonFilter`],
//! 2. [`unpivot`] the tier columns into long [`IntervalCell`]s,
//! 3. join each cell's tier against the variety susceptibility map,
//! 4. pivot the `Range` discriminator back into `min_days` / `max_days`,
//!    first value per (substance, variety) bound winning.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::Serialize;
use spint_calendar::Season;
use tracing::{debug, info, warn};

use crate::error::ReferenceDataError;
use crate::schema;
use crate::susceptibility::SusceptibilityMap;
use crate::table::Table;

/// Which bound of an interval a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeBound {
    /// Lower threshold (warning).
    Min,
    /// Upper threshold (expired).
    Max,
}

impl FromStr for RangeBound {
    type Err = ();

    /// Parses the literal `min` or `max`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(()),
        }
    }
}

/// Row predicate of the interval table.
///
/// A row is kept when its season label matches the active season, or when
/// its substance is not season-specific.
#[derive(Debug, Clone)]
pub struct SeasonFilter<'a> {
    season: Season,
    season_specific: &'a BTreeSet<String>,
}

impl<'a> SeasonFilter<'a> {
    /// Creates a filter for the active season.
    pub fn new(season: Season, season_specific: &'a BTreeSet<String>) -> Self {
        Self {
            season,
            season_specific,
        }
    }

    /// Returns `true` if a row with this substance and season label is kept.
    pub fn keeps(&self, substance: &str, season_label: &str) -> bool {
        season_label == self.season.label() || !self.season_specific.contains(substance)
    }
}

/// One tier value of the interval table in long form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalCell {
    pub substance: String,
    pub tier: String,
    pub range: RangeBound,
    pub days: u32,
}

/// Treatment interval thresholds for one (substance, variety) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalRef {
    pub substance: String,
    pub variety: String,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
}

/// Interval thresholds keyed by (substance, variety).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalTable {
    by_pair: BTreeMap<(String, String), IntervalRef>,
}

impl IntervalTable {
    /// Looks up the thresholds of a (substance, variety) pair.
    pub fn get(&self, substance: &str, variety: &str) -> Option<&IntervalRef> {
        self.by_pair
            .get(&(substance.to_string(), variety.to_string()))
    }

    /// Number of (substance, variety) pairs.
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    /// Returns `true` when no pair has thresholds.
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    /// Iterates rows ordered by substance, then variety.
    pub fn iter(&self) -> impl Iterator<Item = &IntervalRef> {
        self.by_pair.values()
    }
}

/// Resolves the tier columns of the interval table.
///
/// Declared columns must all exist. Without a declaration every column other
/// than `Mittel`, `Jahreszeit` and `Range` is a tier column.
fn tier_columns(table: &Table, declared: Option<&[String]>) -> Result<Vec<usize>, ReferenceDataError> {
    let cols: Vec<usize> = match declared {
        Some(names) => {
            let missing: Vec<String> = names
                .iter()
                .filter(|n| table.column(n).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(ReferenceDataError::MissingColumns {
                    table: table.name().to_string(),
                    columns: missing,
                });
            }
            names.iter().filter_map(|n| table.column(n)).collect()
        }
        None => table
            .headers()
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                !h.is_empty() && ![schema::SUBSTANCE, schema::SEASON, schema::RANGE].contains(&h.as_str())
            })
            .map(|(i, _)| i)
            .collect(),
    };
    if cols.is_empty() {
        return Err(ReferenceDataError::NoTierColumns {
            table: table.name().to_string(),
        });
    }
    Ok(cols)
}

/// Unpivots the tier columns of the admitted rows into long form.
///
/// Empty tier cells are skipped. Every `Range` cell must be `min` or `max`,
/// including in rows the filter rejects, and day values must be whole
/// non-negative numbers.
///
/// # Errors
///
/// Returns [`ReferenceDataError::MissingColumns`],
/// [`ReferenceDataError::NoTierColumns`], [`ReferenceDataError::InvalidRange`]
/// or [`ReferenceDataError::InvalidNumber`].
pub fn unpivot(
    table: &Table,
    declared_tiers: Option<&[String]>,
    filter: &SeasonFilter<'_>,
) -> Result<Vec<IntervalCell>, ReferenceDataError> {
    let [substance_col, season_col, range_col] =
        table.require_columns([schema::SUBSTANCE, schema::SEASON, schema::RANGE])?;
    let tiers = tier_columns(table, declared_tiers)?;

    let mut cells = Vec::new();
    let mut kept_rows = 0usize;
    for row in 0..table.n_rows() {
        let raw_range = table.cell(row, range_col);
        let range = raw_range
            .parse::<RangeBound>()
            .map_err(|()| ReferenceDataError::InvalidRange {
                table: table.name().to_string(),
                row: row + 1,
                value: raw_range.to_string(),
            })?;
        let substance = table.cell(row, substance_col);
        if !filter.keeps(substance, table.cell(row, season_col)) {
            continue;
        }
        kept_rows += 1;
        for &col in &tiers {
            let Some(days) = table.number(row, col)? else {
                continue;
            };
            if days < 0.0 || days.fract() != 0.0 || days > f64::from(u32::MAX) {
                return Err(table.invalid_number(row, col));
            }
            cells.push(IntervalCell {
                substance: substance.to_string(),
                tier: table.headers()[col].clone(),
                range,
                days: days as u32,
            });
        }
    }
    debug!(
        kept_rows,
        total_rows = table.n_rows(),
        n_cells = cells.len(),
        "unpivoted interval table"
    );
    Ok(cells)
}

/// Joins long interval cells with the susceptibility map and pivots the
/// range back into per-pair bounds.
///
/// For each (substance, variety, range) the first cell wins.
pub fn join_and_pivot(cells: &[IntervalCell], susceptibility: &SusceptibilityMap) -> IntervalTable {
    let mut by_pair: BTreeMap<(String, String), IntervalRef> = BTreeMap::new();
    for cell in cells {
        for variety in susceptibility.varieties_in(&cell.tier) {
            let entry = by_pair
                .entry((cell.substance.clone(), variety.to_string()))
                .or_insert_with(|| IntervalRef {
                    substance: cell.substance.clone(),
                    variety: variety.to_string(),
                    min_days: None,
                    max_days: None,
                });
            let slot = match cell.range {
                RangeBound::Min => &mut entry.min_days,
                RangeBound::Max => &mut entry.max_days,
            };
            slot.get_or_insert(cell.days);
        }
    }
    IntervalTable { by_pair }
}

/// Derives per (substance, variety) interval thresholds for the active
/// season.
///
/// An empty filtered or joined result yields an empty table and a warning.
///
/// # Errors
///
/// Propagates the errors of [`unpivot`].
pub fn derive_intervals(
    table: &Table,
    susceptibility: &SusceptibilityMap,
    season: Season,
    season_specific: &BTreeSet<String>,
    declared_tiers: Option<&[String]>,
) -> Result<IntervalTable, ReferenceDataError> {
    let filter = SeasonFilter::new(season, season_specific);
    let cells = unpivot(table, declared_tiers, &filter)?;
    if cells.is_empty() {
        warn!(season = %season, "no interval rows left after season filter");
        return Ok(IntervalTable::default());
    }
    let intervals = join_and_pivot(&cells, susceptibility);
    if intervals.is_empty() {
        warn!(
            season = %season,
            "no interval tier matches a known variety susceptibility"
        );
        return Ok(intervals);
    }
    info!(n_pairs = intervals.len(), season = %season, "derived treatment intervals");
    Ok(intervals)
}

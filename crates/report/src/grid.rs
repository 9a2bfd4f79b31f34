//! Plot × purpose grids.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use spint_reconcile::ReconciledRecord;

use crate::status::ProtectionStatus;

/// The quantity a grid compares against its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Days since the last treatment vs. the treatment interval.
    #[serde(rename = "Tage")]
    Days,
    /// Rain since the last treatment vs. the rain resistance.
    #[serde(rename = "Niederschlag")]
    Rainfall,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Days => "Tage",
            Self::Rainfall => "Niederschlag",
        }
    }

    fn decimals(self) -> usize {
        match self {
            Self::Days => 0,
            Self::Rainfall => 1,
        }
    }

    /// Formats a value, `None` rendering as `missing`.
    fn format(self, value: Option<f64>, missing: &str) -> String {
        match value {
            Some(v) => format!("{v:.prec$}", prec = self.decimals()),
            None => missing.to_string(),
        }
    }

    /// Extracts (value, min, max) from a record.
    fn extract(self, record: &ReconciledRecord) -> (Option<f64>, f64, f64) {
        match self {
            Self::Days => (
                Some(record.days_elapsed as f64),
                f64::from(record.interval_min),
                f64::from(record.interval_max),
            ),
            Self::Rainfall => (record.rainfall_mm, record.rain_min, record.rain_max),
        }
    }
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub substance: String,
    /// `"value / max (substance)"`.
    pub display: String,
    pub status: ProtectionStatus,
}

impl Cell {
    /// Builds a cell, deriving its display string and status.
    pub fn new(metric: Metric, value: Option<f64>, min: Option<f64>, max: Option<f64>, substance: &str) -> Self {
        let substance = if substance.is_empty() { "?" } else { substance };
        let display = format!(
            "{} / {} ({substance})",
            metric.format(value, ""),
            metric.format(max, "?"),
        );
        Self {
            value,
            min,
            max,
            substance: substance.to_string(),
            display,
            status: ProtectionStatus::classify(value, min, max),
        }
    }
}

/// One (plot, variety) row; cells keyed by purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub plot: String,
    pub variety: String,
    pub cells: BTreeMap<String, Cell>,
}

/// A metric pivoted into (plot, variety) rows and purpose columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub metric: Metric,
    /// Sorted purpose columns.
    pub purposes: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// Pivots records into a grid; the first record per cell wins.
    pub fn build(metric: Metric, records: &[ReconciledRecord]) -> Self {
        let purposes: BTreeSet<&str> = records.iter().map(|r| r.purpose.as_str()).collect();
        let mut rows: BTreeMap<(&str, &str), BTreeMap<String, Cell>> = BTreeMap::new();
        for record in records {
            let (value, min, max) = metric.extract(record);
            rows.entry((record.plot.as_str(), record.variety.as_str()))
                .or_default()
                .entry(record.purpose.clone())
                .or_insert_with(|| Cell::new(metric, value, Some(min), Some(max), &record.substance));
        }
        Self {
            metric,
            purposes: purposes.into_iter().map(str::to_string).collect(),
            rows: rows
                .into_iter()
                .map(|((plot, variety), cells)| GridRow {
                    plot: plot.to_string(),
                    variety: variety.to_string(),
                    cells,
                })
                .collect(),
        }
    }

    /// Counts cells per status.
    pub fn status_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for cell in self.rows.iter().flat_map(|r| r.cells.values()) {
            *counts.entry(cell.status.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

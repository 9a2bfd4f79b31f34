//! Status report assembly and rendering.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use spint_reconcile::ReconciledRecord;
use tracing::info;

use crate::error::ReportError;
use crate::grid::{Grid, Metric};

/// Day and rainfall grids for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Reference instant of the run.
    pub generated_at: NaiveDateTime,
    pub grids: Vec<Grid>,
}

impl StatusReport {
    pub fn grid(&self, metric: Metric) -> Option<&Grid> {
        self.grids.iter().find(|g| g.metric == metric)
    }
}

/// Builds the `Tage` and `Niederschlag` grids from reconciled records.
pub fn build_report(records: &[ReconciledRecord], now: NaiveDateTime) -> StatusReport {
    let grids: Vec<Grid> = [Metric::Days, Metric::Rainfall]
        .into_iter()
        .map(|m| Grid::build(m, records))
        .collect();
    for grid in &grids {
        info!(
            metric = grid.metric.label(),
            n_rows = grid.rows.len(),
            n_purposes = grid.purposes.len(),
            "built status grid"
        );
    }
    StatusReport {
        generated_at: now,
        grids,
    }
}

/// Serialize a status report to a JSON string.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    serde_json::to_string_pretty(value).map_err(|e| ReportError::Serialization {
        reason: e.to_string(),
    })
}

fn pad(s: &str, width: usize) -> String {
    let n = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(n)))
}

/// Renders one grid as an aligned plain-text table followed by its status
/// counts.
fn write_grid(grid: &Grid, out: &mut impl fmt::Write) -> fmt::Result {
    let mut header = vec!["Wiese".to_string(), "Sorte".to_string()];
    header.extend(grid.purposes.iter().cloned());

    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.plot.clone(), row.variety.clone()];
            line.extend(grid.purposes.iter().map(|p| match row.cells.get(p) {
                Some(cell) if cell.status.marker().is_empty() => cell.display.clone(),
                Some(cell) => format!("{} {}", cell.display, cell.status.marker()),
                None => String::new(),
            }));
            line
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|line| line[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out, "== {} ==", grid.metric.label())?;
    for line in std::iter::once(&header).chain(body.iter()) {
        let cells: Vec<String> = line.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        writeln!(out, "{}", cells.join(" | ").trim_end())?;
    }
    let counts: Vec<String> = grid
        .status_counts()
        .iter()
        .map(|(status, n)| format!("{status}={n}"))
        .collect();
    writeln!(out, "Status: {}", counts.join(", "))
}

/// Plain-text rendering.
///
/// Markers: `[!]` warning, `[x]` expired, `[?]` no value.
impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stand: {}", self.generated_at.format("%Y-%m-%d %H:%M"))?;
        if self.grids.iter().all(|g| g.rows.is_empty()) {
            return writeln!(f, "Keine Daten.");
        }
        for grid in &self.grids {
            writeln!(f)?;
            write_grid(grid, f)?;
        }
        Ok(())
    }
}

/// Renders the report as plain text.
pub fn render_text(report: &StatusReport) -> String {
    report.to_string()
}

//! Treatment log file adapter.

use std::path::PathBuf;

use spint_reconcile::RawTreatment;
use tracing::{debug, info};

use crate::delimited::{TableFormat, read_table, require_columns};
use crate::error::IoError;
use crate::source::TreatmentSource;
use crate::validate::ValidationCollector;

/// Column names of the treatment log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentColumns {
    pub plot: String,
    pub substance: String,
    pub purpose: String,
    pub date: String,
}

impl Default for TreatmentColumns {
    fn default() -> Self {
        Self {
            plot: "Anlage".to_string(),
            substance: "Mittel".to_string(),
            purpose: "Grund".to_string(),
            date: "Datum".to_string(),
        }
    }
}

/// Reads the treatment log from a delimited file.
///
/// The requested year is informational; every row of the file is returned.
#[derive(Debug, Clone)]
pub struct CsvTreatmentSource {
    path: PathBuf,
    format: TableFormat,
    columns: TreatmentColumns,
}

impl CsvTreatmentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: TableFormat::default(),
            columns: TreatmentColumns::default(),
        }
    }

    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_columns(mut self, columns: TreatmentColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Validates column names and format.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem.
    pub fn validate(&self) -> Result<(), IoError> {
        self.format.validate()?;
        let mut c = ValidationCollector::new();
        c.require_name("plot", &self.columns.plot);
        c.require_name("substance", &self.columns.substance);
        c.require_name("purpose", &self.columns.purpose);
        c.require_name("date", &self.columns.date);
        c.finish()
    }
}

impl TreatmentSource for CsvTreatmentSource {
    fn fetch_treatments(&self, year: i32) -> Result<Vec<RawTreatment>, IoError> {
        self.validate()?;
        let table = read_table(&self.path, "treatments", &self.format)?;
        let [plot, substance, purpose, date] = require_columns(
            &table,
            [
                self.columns.plot.as_str(),
                self.columns.substance.as_str(),
                self.columns.purpose.as_str(),
                self.columns.date.as_str(),
            ],
            &self.path,
        )?;

        let rows: Vec<RawTreatment> = (0..table.n_rows())
            .map(|r| {
                RawTreatment::new(
                    table.cell(r, plot),
                    table.cell(r, substance),
                    table.cell(r, purpose),
                    table.cell(r, date),
                )
            })
            .collect();
        debug!(path = %self.path.display(), "treatment log columns resolved");
        info!(year, n_rows = rows.len(), "fetched treatment log");
        Ok(rows)
    }
}

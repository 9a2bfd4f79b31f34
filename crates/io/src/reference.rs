//! Reading the three reference tables from a directory.

use std::path::{Path, PathBuf};

use spint_reference::{Table, schema};
use tracing::info;

use crate::delimited::{Encoding, TableFormat, read_table};
use crate::error::IoError;

/// Locations and formats of the reference files.
#[derive(Debug, Clone)]
pub struct ReferenceFiles {
    dir: PathBuf,
    rain_file: String,
    susceptibility_file: String,
    interval_file: String,
    encoding: Encoding,
}

impl ReferenceFiles {
    /// Default file names inside `dir`, Latin-1 encoded.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rain_file: "regenbestaendigkeit.csv".to_string(),
            susceptibility_file: "sortenanfaelligkeit.csv".to_string(),
            interval_file: "behandlungsintervall.csv".to_string(),
            encoding: Encoding::Latin1,
        }
    }

    pub fn with_rain_file(mut self, name: impl Into<String>) -> Self {
        self.rain_file = name.into();
        self
    }

    pub fn with_susceptibility_file(mut self, name: impl Into<String>) -> Self {
        self.susceptibility_file = name.into();
        self
    }

    pub fn with_interval_file(mut self, name: impl Into<String>) -> Self {
        self.interval_file = name.into();
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn rain_path(&self) -> PathBuf {
        self.dir.join(&self.rain_file)
    }

    pub fn susceptibility_path(&self) -> PathBuf {
        self.dir.join(&self.susceptibility_file)
    }

    pub fn interval_path(&self) -> PathBuf {
        self.dir.join(&self.interval_file)
    }
}

/// Raw reference tables, not yet validated.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub rain: Table,
    pub susceptibility: Table,
    pub interval: Table,
}

/// Reads the rain-resistance and susceptibility tables (comma separated)
/// and the interval table (tab separated).
///
/// # Errors
///
/// Returns [`IoError`] if any file is missing or unreadable.
pub fn read_reference_tables(files: &ReferenceFiles) -> Result<ReferenceTables, IoError> {
    let comma = TableFormat::default().with_encoding(files.encoding);
    let tab = comma.with_delimiter('\t');

    let rain = read_table(&files.rain_path(), schema::tables::RAIN_RESISTANCE, &comma)?;
    let susceptibility = read_table(
        &files.susceptibility_path(),
        schema::tables::SUSCEPTIBILITY,
        &comma,
    )?;
    let interval = read_table(&files.interval_path(), schema::tables::INTERVAL, &tab)?;

    info!(
        dir = %files.dir.display(),
        rain_rows = rain.n_rows(),
        susceptibility_rows = susceptibility.n_rows(),
        interval_rows = interval.n_rows(),
        "read reference tables"
    );
    Ok(ReferenceTables {
        rain,
        susceptibility,
        interval,
    })
}

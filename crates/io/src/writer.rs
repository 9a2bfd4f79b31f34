//! JSON and CSV output.

use std::fs;
use std::path::Path;

use serde::Serialize;
use spint_reconcile::ReconciledRecord;
use tracing::info;

use crate::error::IoError;

fn ensure_parent(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| IoError::io(parent, &e))?;
    }
    Ok(())
}

/// Writes any serializable value as pretty-printed JSON.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`IoError::Json`] or [`IoError::Io`].
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| IoError::io(path, &e))?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

/// Writes reconciled records as a comma-separated file with a header row.
///
/// Missing rainfall is written as an empty cell.
///
/// # Errors
///
/// Returns [`IoError::Csv`] or [`IoError::Io`].
pub fn write_records_csv(path: &Path, records: &[ReconciledRecord]) -> Result<(), IoError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, &e))?;
    for record in records {
        writer.serialize(record).map_err(|e| IoError::csv(path, &e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, &e))?;
    info!(path = %path.display(), n_records = records.len(), "wrote records csv");
    Ok(())
}

//! Format-independent tabular input.

use crate::error::ReferenceDataError;

/// A header row plus string cells, as read from a delimited file.
///
/// The loader never sees file formats; readers build a `Table` and the
/// reference stages validate columns and parse cells from it. Rows shorter
/// than the header read as empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with a logical name used in error messages.
    ///
    /// Header names are trimmed.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    /// Returns the logical table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the header names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolves every named column or reports all missing ones at once.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::MissingColumns`] listing each absent
    /// column.
    pub fn require_columns<const N: usize>(
        &self,
        names: [&str; N],
    ) -> Result<[usize; N], ReferenceDataError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.column(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ReferenceDataError::MissingColumns {
                table: self.name.clone(),
                columns: missing,
            });
        }
        Ok(names.map(|n| self.column(n).unwrap_or_default()))
    }

    /// Returns the trimmed cell at (`row`, `col`), or `""` if absent.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", |c| c.trim())
    }

    /// Parses an optional numeric cell.
    ///
    /// Empty cells and `NA`/`nan` markers read as `None`. A decimal comma is
    /// accepted in place of a decimal point.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::InvalidNumber`] for unparsable or
    /// non-finite values.
    pub fn number(&self, row: usize, col: usize) -> Result<Option<f64>, ReferenceDataError> {
        let raw = self.cell(row, col);
        if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        match raw.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(self.invalid_number(row, col)),
        }
    }

    /// Builds an [`ReferenceDataError::InvalidNumber`] for the given cell.
    pub(crate) fn invalid_number(&self, row: usize, col: usize) -> ReferenceDataError {
        ReferenceDataError::InvalidNumber {
            table: self.name.clone(),
            row: row + 1,
            column: self.headers.get(col).cloned().unwrap_or_default(),
            value: self.cell(row, col).to_string(),
        }
    }
}

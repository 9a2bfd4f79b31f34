//! Delimited-file reading into [`Table`]s.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use spint_reference::Table;
use tracing::debug;

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Text encoding of an input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Decodes file contents. A UTF-8 byte-order mark is dropped.
    fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String, IoError> {
        match self {
            Self::Utf8 => {
                let text = String::from_utf8(bytes).map_err(|_| IoError::Encoding {
                    path: path.to_path_buf(),
                    encoding: self.to_string(),
                })?;
                Ok(match text.strip_prefix('\u{feff}') {
                    Some(rest) => rest.to_string(),
                    None => text,
                })
            }
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        })
    }
}

impl FromStr for Encoding {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(IoError::Validation {
                count: 1,
                details: format!("unsupported encoding '{other}' (expected utf-8 or latin-1)"),
            }),
        }
    }
}

/// Delimiter and encoding of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    delimiter: char,
    encoding: Encoding,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: Encoding::Utf8,
        }
    }
}

impl TableFormat {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Validates this format.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the delimiter is not a single
    /// ASCII character other than a quote or line break.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            c.push(format!("delimiter {:?} must be an ASCII separator", self.delimiter));
        }
        c.finish()
    }
}

/// Reads a delimited file with a header row into a [`Table`].
///
/// Rows may be shorter than the header; blank lines are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Encoding`],
/// [`IoError::Csv`] or [`IoError::Validation`].
pub fn read_table(path: &Path, name: &str, format: &TableFormat) -> Result<Table, IoError> {
    format.validate()?;
    let bytes = std::fs::read(path).map_err(|e| IoError::io(path, &e))?;
    let text = format.encoding.decode(bytes, path)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::csv(path, &e))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, &e))?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        path = %path.display(),
        n_columns = headers.len(),
        n_rows = rows.len(),
        "read delimited table"
    );
    Ok(Table::new(name, headers, rows))
}

/// Resolves every named column of `table` or reports all missing ones.
pub(crate) fn require_columns<const N: usize>(
    table: &Table,
    names: [&str; N],
    path: &Path,
) -> Result<[usize; N], IoError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|n| table.column(n).is_none())
        .map(|n| n.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IoError::MissingColumns {
            names: missing,
            path: path.to_path_buf(),
        });
    }
    Ok(names.map(|n| table.column(n).unwrap_or_default()))
}

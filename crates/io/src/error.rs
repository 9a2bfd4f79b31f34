//! Error types for spint-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the spint-io crate.
///
/// Covers file-system failures, malformed delimited files, missing columns
/// and unparsable cells. Whether an error aborts a run depends on the
/// source: treatment-log errors are fatal, weather errors degrade to
/// missing rainfall.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when reading or writing a file fails.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV parser or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when file contents are not valid in the configured encoding.
    #[error("cannot decode {} as {encoding}", path.display())]
    Encoding {
        /// Path being read.
        path: PathBuf,
        /// Name of the configured encoding.
        encoding: String,
    },

    /// Returned when one or more required columns are absent.
    #[error("column(s) {} not found in {}", names.join(", "), path.display())]
    MissingColumns {
        /// Names of the missing columns.
        names: Vec<String>,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a numeric cell cannot be parsed.
    #[error("{} row {row}, column '{column}': invalid number '{value}'", path.display())]
    InvalidNumber {
        /// Path being read.
        path: PathBuf,
        /// 1-based data row number.
        row: usize,
        /// Column name.
        column: String,
        /// The offending cell text.
        value: String,
    },

    /// Returned when a time value cannot be parsed.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps a JSON serialization failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the serializer failure.
        reason: String,
    },
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    pub(crate) fn io(path: &std::path::Path, e: &std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }

    pub(crate) fn csv(path: &std::path::Path, e: &csv::Error) -> Self {
        IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_io() {
        let err = IoError::Io {
            path: PathBuf::from("/data/out.json"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "i/o error on /data/out.json: permission denied");
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            path: PathBuf::from("log.csv"),
            reason: "unequal lengths".to_string(),
        };
        assert_eq!(err.to_string(), "csv error in log.csv: unequal lengths");
    }

    #[test]
    fn display_encoding() {
        let err = IoError::Encoding {
            path: PathBuf::from("regen.csv"),
            encoding: "utf-8".to_string(),
        };
        assert_eq!(err.to_string(), "cannot decode regen.csv as utf-8");
    }

    #[test]
    fn display_missing_columns() {
        let err = IoError::MissingColumns {
            names: vec!["Anlage".to_string(), "Datum".to_string()],
            path: PathBuf::from("/data/log.csv"),
        };
        assert_eq!(err.to_string(), "column(s) Anlage, Datum not found in /data/log.csv");
    }

    #[test]
    fn display_invalid_number() {
        let err = IoError::InvalidNumber {
            path: PathBuf::from("wetter.csv"),
            row: 7,
            column: "wet_niederschl".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wetter.csv row 7, column 'wet_niederschl': invalid number 'x'"
        );
    }

    #[test]
    fn display_invalid_time() {
        let err = IoError::InvalidTime {
            reason: "row 3: '2024-13-01'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid time: row 3: '2024-13-01'");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "delimiter must be ASCII; scale must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): delimiter must be ASCII; scale must be positive"
        );
    }

    #[test]
    fn io_not_found_maps_to_file_not_found() {
        let e = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IoError::io(std::path::Path::new("a.csv"), &e);
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}

//! Error types for spint-reference.

/// Error type for all fallible operations in the spint-reference crate.
///
/// Every variant is fatal for a reconciliation run: reference data is loaded
/// before any treatment is processed, and a malformed table aborts the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReferenceDataError {
    /// Returned when a table lacks one or more mandatory columns.
    #[error("reference table '{table}' is missing column(s): {}", columns.join(", "))]
    MissingColumns {
        /// Logical name of the table.
        table: String,
        /// Names of the missing columns.
        columns: Vec<String>,
    },

    /// Returned when the interval table has no susceptibility tier columns.
    #[error("reference table '{table}' has no susceptibility tier columns")]
    NoTierColumns {
        /// Logical name of the table.
        table: String,
    },

    /// Returned when a `Range` cell is neither `min` nor `max`.
    #[error("reference table '{table}' row {row}: invalid Range '{value}' (expected min or max)")]
    InvalidRange {
        /// Logical name of the table.
        table: String,
        /// 1-based data row number.
        row: usize,
        /// The offending cell text.
        value: String,
    },

    /// Returned when a numeric cell cannot be parsed or is out of range.
    #[error("reference table '{table}' row {row}, column '{column}': invalid number '{value}'")]
    InvalidNumber {
        /// Logical name of the table.
        table: String,
        /// 1-based data row number.
        row: usize,
        /// Column name.
        column: String,
        /// The offending cell text.
        value: String,
    },

    /// Returned when the loader configuration is invalid.
    #[error("invalid reference config: {reason}")]
    InvalidConfig {
        /// Description of the invalid setting.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_columns() {
        let err = ReferenceDataError::MissingColumns {
            table: "regenbestaendigkeit".to_string(),
            columns: vec!["Mittel".to_string(), "Regenbestaendigkeit".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "reference table 'regenbestaendigkeit' is missing column(s): Mittel, Regenbestaendigkeit"
        );
    }

    #[test]
    fn display_no_tier_columns() {
        let err = ReferenceDataError::NoTierColumns {
            table: "behandlungsintervall".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "reference table 'behandlungsintervall' has no susceptibility tier columns"
        );
    }

    #[test]
    fn display_invalid_range() {
        let err = ReferenceDataError::InvalidRange {
            table: "behandlungsintervall".to_string(),
            row: 3,
            value: "mid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "reference table 'behandlungsintervall' row 3: invalid Range 'mid' (expected min or max)"
        );
    }

    #[test]
    fn display_invalid_number() {
        let err = ReferenceDataError::InvalidNumber {
            table: "regenbestaendigkeit".to_string(),
            row: 2,
            column: "Regenbestaendigkeit".to_string(),
            value: "viel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "reference table 'regenbestaendigkeit' row 2, column 'Regenbestaendigkeit': invalid number 'viel'"
        );
    }

    #[test]
    fn display_invalid_config() {
        let err = ReferenceDataError::InvalidConfig {
            reason: "t1_factor must be in (0, 1], got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid reference config: t1_factor must be in (0, 1], got 0"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ReferenceDataError>();
    }
}

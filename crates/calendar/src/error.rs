//! Error types for the spint-calendar crate.

/// Error type for all fallible operations in the spint-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a date string does not match the expected format.
    #[error("invalid date '{value}' (expected format {format})")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
        /// The `strftime`-style format it was parsed with.
        format: String,
    },

    /// Returned when a season label is not one of the known labels.
    #[error("unknown season label '{label}'")]
    UnknownSeason {
        /// The unrecognised label.
        label: String,
    },
}

//! Error types for spint-report.

/// Error type for all fallible operations in the spint-report crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// Returned when the report cannot be serialized.
    #[error("report serialization failed: {reason}")]
    Serialization {
        /// Underlying serializer message.
        reason: String,
    },
}

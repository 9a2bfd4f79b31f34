//! Error types for spint-reconcile.

/// Error type for all fallible operations in the spint-reconcile crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessingError {
    /// Returned when the engine configuration is invalid.
    #[error("invalid reconcile config: {reason}")]
    InvalidConfig {
        /// Description of the invalid setting.
        reason: String,
    },

    /// Returned when a treatment event lacks a grouping key.
    #[error("treatment event {index} has an empty '{field}' field")]
    MissingGroupingField {
        /// Name of the empty field.
        field: &'static str,
        /// 0-based position of the event.
        index: usize,
    },
}

//! Protection status of a single cell.

use std::fmt;

use serde::Serialize;

/// How a measured value compares with its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionStatus {
    /// Below the lower threshold.
    Protected,
    /// At or above the lower threshold, below the upper one.
    Warning,
    /// At or above the upper threshold.
    Expired,
    /// No measured value.
    Unknown,
}

impl ProtectionStatus {
    /// Classifies `value` against `min` / `max`.
    ///
    /// With only a lower threshold, reaching it is a warning.
    pub fn classify(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> Self {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return Self::Unknown;
        };
        if max.is_some_and(|m| v >= m) {
            Self::Expired
        } else if min.is_some_and(|m| v >= m) {
            Self::Warning
        } else {
            Self::Protected
        }
    }

    /// Short marker used in the text rendering.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Protected => "",
            Self::Warning => "[!]",
            Self::Expired => "[x]",
            Self::Unknown => "[?]",
        }
    }
}

impl fmt::Display for ProtectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Protected => "protected",
            Self::Warning => "warning",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

//! Configuration for the reconciliation engine.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ProcessingError;

/// Purposes tracked when no explicit set is configured.
pub const DEFAULT_RELEVANT_PURPOSES: [&str; 5] = [
    "Apfelmehltau",
    "Apfelschorf",
    "Blattdüngung",
    "Ca-Düngung",
    "Bittersalz",
];

/// Substance → purpose overrides applied when no explicit table is
/// configured. Keys are lowercase.
pub const DEFAULT_SUBSTANCE_OVERRIDES: [(&str, &str); 5] = [
    ("yaravita stopit", "Ca-Düngung"),
    ("epso combitop", "Bittersalz"),
    ("epso top", "Bittersalz"),
    ("ats", "Chemisches Ausdünnen"),
    ("supreme n", "Chemisches Ausdünnen"),
];

/// Configuration for [`reconcile`](crate::reconcile).
///
/// # Example
///
/// ```
/// use spint_reconcile::ReconcileConfig;
///
/// let config = ReconcileConfig::new()
///     .with_default_rain_mm(25.0)
///     .with_substance_override("Kalzium Plus", "Ca-Düngung");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.purpose_override("KALZIUM PLUS"), Some("Ca-Düngung"));
/// ```
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    t1_factor: f64,
    default_rain_mm: f64,
    default_interval_days: u32,
    date_format: String,
    relevant_purposes: BTreeSet<String>,
    substance_overrides: BTreeMap<String, String>,
    plot_rewrites: Vec<(String, String)>,
}

impl ReconcileConfig {
    /// Creates a configuration with the standard defaults.
    ///
    /// `t1_factor = 0.75`, 30 mm default rain resistance, 14 day default
    /// interval, `%d/%m/%Y` dates, the five tracked purposes, the five
    /// substance overrides and the `Neuacker Klein → Neuacker` rewrite.
    pub fn new() -> Self {
        Self {
            t1_factor: 0.75,
            default_rain_mm: 30.0,
            default_interval_days: 14,
            date_format: "%d/%m/%Y".to_string(),
            relevant_purposes: DEFAULT_RELEVANT_PURPOSES.iter().map(|p| p.to_string()).collect(),
            substance_overrides: DEFAULT_SUBSTANCE_OVERRIDES
                .iter()
                .map(|(s, p)| (s.to_string(), p.to_string()))
                .collect(),
            plot_rewrites: vec![("Neuacker Klein".to_string(), "Neuacker".to_string())],
        }
    }

    /// Sets the factor deriving minimum thresholds from maximum thresholds.
    pub fn with_t1_factor(mut self, f: f64) -> Self {
        self.t1_factor = f;
        self
    }

    /// Sets the rain resistance used for substances without a reference row.
    pub fn with_default_rain_mm(mut self, mm: f64) -> Self {
        self.default_rain_mm = mm;
        self
    }

    /// Sets the interval used for pairs without a reference maximum.
    pub fn with_default_interval_days(mut self, days: u32) -> Self {
        self.default_interval_days = days;
        self
    }

    /// Sets the `chrono` format of treatment dates.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Replaces the set of tracked purposes.
    pub fn with_relevant_purposes<I, S>(mut self, purposes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relevant_purposes = purposes.into_iter().map(Into::into).collect();
        self
    }

    /// Adds or replaces one substance → purpose override.
    ///
    /// Matching is case-insensitive.
    pub fn with_substance_override(mut self, substance: &str, purpose: impl Into<String>) -> Self {
        self.substance_overrides
            .insert(substance.trim().to_lowercase(), purpose.into());
        self
    }

    /// Replaces the plot-name rewrites, applied in order as substring
    /// replacements.
    pub fn with_plot_rewrites<I, F, T>(mut self, rewrites: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        self.plot_rewrites = rewrites
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        self
    }

    pub fn t1_factor(&self) -> f64 {
        self.t1_factor
    }

    pub fn default_rain_mm(&self) -> f64 {
        self.default_rain_mm
    }

    pub fn default_interval_days(&self) -> u32 {
        self.default_interval_days
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn relevant_purposes(&self) -> &BTreeSet<String> {
        &self.relevant_purposes
    }

    pub fn substance_overrides(&self) -> &BTreeMap<String, String> {
        &self.substance_overrides
    }

    pub fn plot_rewrites(&self) -> &[(String, String)] {
        &self.plot_rewrites
    }

    /// Returns the purpose forced for a substance, if any.
    pub fn purpose_override(&self, substance: &str) -> Option<&str> {
        self.substance_overrides
            .get(&substance.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidConfig`] if `t1_factor` is not in
    /// `(0, 1]`, the default rain resistance is negative or non-finite, the
    /// default interval is zero, the date format is empty or the purpose set
    /// is empty.
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if !self.t1_factor.is_finite() || self.t1_factor <= 0.0 || self.t1_factor > 1.0 {
            return Err(ProcessingError::InvalidConfig {
                reason: format!("t1_factor must be in (0, 1], got {}", self.t1_factor),
            });
        }
        if !self.default_rain_mm.is_finite() || self.default_rain_mm < 0.0 {
            return Err(ProcessingError::InvalidConfig {
                reason: format!(
                    "default_rain_mm must be finite and non-negative, got {}",
                    self.default_rain_mm
                ),
            });
        }
        if self.default_interval_days == 0 {
            return Err(ProcessingError::InvalidConfig {
                reason: "default_interval_days must be positive".to_string(),
            });
        }
        if self.date_format.trim().is_empty() {
            return Err(ProcessingError::InvalidConfig {
                reason: "date_format must not be empty".to_string(),
            });
        }
        if self.relevant_purposes.is_empty() {
            return Err(ProcessingError::InvalidConfig {
                reason: "relevant_purposes must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ReconcileConfig::new();
        assert!((cfg.t1_factor() - 0.75).abs() < f64::EPSILON);
        assert!((cfg.default_rain_mm() - 30.0).abs() < f64::EPSILON);
        assert_eq!(cfg.default_interval_days(), 14);
        assert_eq!(cfg.date_format(), "%d/%m/%Y");
        assert_eq!(cfg.relevant_purposes().len(), 5);
        assert_eq!(cfg.substance_overrides().len(), 5);
        assert_eq!(cfg.plot_rewrites().len(), 1);
    }

    #[test]
    fn override_is_case_insensitive() {
        let cfg = ReconcileConfig::new();
        assert_eq!(cfg.purpose_override("Yaravita Stopit"), Some("Ca-Düngung"));
        assert_eq!(cfg.purpose_override(" EPSO Top "), Some("Bittersalz"));
        assert_eq!(cfg.purpose_override("Delan WG"), None);
    }

    #[test]
    fn added_override_replaces_default() {
        let cfg = ReconcileConfig::new().with_substance_override("ATS", "Blattdüngung");
        assert_eq!(cfg.purpose_override("ats"), Some("Blattdüngung"));
        assert_eq!(cfg.substance_overrides().len(), 5);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(ReconcileConfig::new().validate().is_ok());
        assert!(ReconcileConfig::new().with_t1_factor(0.0).validate().is_err());
        assert!(ReconcileConfig::new().with_default_rain_mm(-1.0).validate().is_err());
        assert!(ReconcileConfig::new().with_default_interval_days(0).validate().is_err());
        assert!(ReconcileConfig::new().with_date_format(" ").validate().is_err());
        assert!(
            ReconcileConfig::new()
                .with_relevant_purposes(Vec::<String>::new())
                .validate()
                .is_err()
        );
    }

    #[test]
    fn default_matches_new() {
        let a = ReconcileConfig::default();
        let b = ReconcileConfig::new();
        assert_eq!(a.relevant_purposes(), b.relevant_purposes());
        assert_eq!(a.default_interval_days(), b.default_interval_days());
    }
}

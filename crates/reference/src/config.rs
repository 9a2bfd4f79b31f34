//! Configuration for reference loading.

use std::collections::BTreeSet;

use spint_calendar::Season;

use crate::error::ReferenceDataError;

/// Configuration for [`load_reference_data`](crate::load_reference_data).
///
/// # Example
///
/// ```
/// use spint_calendar::Season;
/// use spint_reference::ReferenceConfig;
///
/// let config = ReferenceConfig::new(Season::Summer).with_t1_factor(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    t1_factor: f64,
    season: Season,
    season_specific_substances: BTreeSet<String>,
    tier_columns: Option<Vec<String>>,
}

impl ReferenceConfig {
    /// Creates a configuration for the given active season.
    ///
    /// Defaults: `t1_factor = 0.75`, season-specific substances
    /// `{"Nimrod 250 EW"}`, tier columns derived from the interval header.
    pub fn new(season: Season) -> Self {
        Self {
            t1_factor: 0.75,
            season,
            season_specific_substances: BTreeSet::from(["Nimrod 250 EW".to_string()]),
            tier_columns: None,
        }
    }

    /// Sets the factor deriving minimum thresholds from maximum thresholds.
    pub fn with_t1_factor(mut self, f: f64) -> Self {
        self.t1_factor = f;
        self
    }

    /// Sets the active season.
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    /// Replaces the substances whose interval rows are filtered by season.
    pub fn with_season_specific_substances<I, S>(mut self, substances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.season_specific_substances = substances.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the susceptibility tier columns of the interval table.
    ///
    /// When unset, every column other than `Mittel`, `Jahreszeit` and `Range`
    /// is a tier column.
    pub fn with_tier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the t1 factor.
    pub fn t1_factor(&self) -> f64 {
        self.t1_factor
    }

    /// Returns the active season.
    pub fn season(&self) -> Season {
        self.season
    }

    /// Returns the season-specific substances.
    pub fn season_specific_substances(&self) -> &BTreeSet<String> {
        &self.season_specific_substances
    }

    /// Returns the declared tier columns, if any.
    pub fn tier_columns(&self) -> Option<&[String]> {
        self.tier_columns.as_deref()
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::InvalidConfig`] if `t1_factor` is not in
    /// `(0, 1]` or the declared tier list is empty.
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        if !self.t1_factor.is_finite() || self.t1_factor <= 0.0 || self.t1_factor > 1.0 {
            return Err(ReferenceDataError::InvalidConfig {
                reason: format!("t1_factor must be in (0, 1], got {}", self.t1_factor),
            });
        }
        if self.tier_columns.as_ref().is_some_and(Vec::is_empty) {
            return Err(ReferenceDataError::InvalidConfig {
                reason: "tier_columns must not be empty when declared".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ReferenceConfig::new(Season::PreBloom);
        assert!((cfg.t1_factor() - 0.75).abs() < f64::EPSILON);
        assert_eq!(cfg.season(), Season::PreBloom);
        assert!(cfg.season_specific_substances().contains("Nimrod 250 EW"));
        assert!(cfg.tier_columns().is_none());
    }

    #[test]
    fn builder_chaining() {
        let cfg = ReferenceConfig::new(Season::PreBloom)
            .with_t1_factor(0.5)
            .with_season(Season::Summer)
            .with_season_specific_substances(["Topas"])
            .with_tier_columns(["niedrig", "hoch"]);
        assert!((cfg.t1_factor() - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.season(), Season::Summer);
        assert_eq!(cfg.season_specific_substances().len(), 1);
        assert!(cfg.season_specific_substances().contains("Topas"));
        assert_eq!(
            cfg.tier_columns().unwrap(),
            ["niedrig".to_string(), "hoch".to_string()]
        );
    }

    #[test]
    fn validate_ok() {
        assert!(ReferenceConfig::new(Season::Summer).validate().is_ok());
        assert!(
            ReferenceConfig::new(Season::Summer)
                .with_t1_factor(1.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_bad_t1_factor() {
        for f in [0.0, -0.5, 1.01, f64::NAN] {
            assert!(
                ReferenceConfig::new(Season::Summer)
                    .with_t1_factor(f)
                    .validate()
                    .is_err(),
                "t1_factor {f} should be rejected"
            );
        }
    }

    #[test]
    fn validate_empty_tier_columns() {
        let cfg = ReferenceConfig::new(Season::Summer).with_tier_columns(Vec::<String>::new());
        assert!(cfg.validate().is_err());
    }
}

//! Collaborator contracts for the two input streams.

use spint_reconcile::{RawTreatment, WeatherObservation};

use crate::error::IoError;

/// Supplies the treatment log of one year.
pub trait TreatmentSource {
    /// Returns every raw treatment row, or an error that aborts the run.
    fn fetch_treatments(&self, year: i32) -> Result<Vec<RawTreatment>, IoError>;
}

/// Supplies the precipitation series.
pub trait WeatherSource {
    /// Returns the observations, `None` when no weather data is available,
    /// or an error for a hard failure.
    fn fetch_weather(&self) -> Result<Option<Vec<WeatherObservation>>, IoError>;
}

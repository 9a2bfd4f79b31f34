//! Season labels and month-cutoff selection.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Growing season used to select interval thresholds.
///
/// The labels match the `Jahreszeit` column of the interval reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// Months up to and including the cutoff month.
    PreBloom,
    /// Months after the cutoff month.
    Summer,
}

impl Season {
    /// Returns the label used in the reference tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::PreBloom => "Vorblüte",
            Self::Summer => "Sommer",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Vorblüte" => Ok(Self::PreBloom),
            "Sommer" => Ok(Self::Summer),
            other => Err(CalendarError::UnknownSeason {
                label: other.to_string(),
            }),
        }
    }
}

/// Selects the season for a calendar month.
///
/// Months `1..=cutoff` are [`Season::PreBloom`], later months are
/// [`Season::Summer`]. A cutoff of 12 therefore yields `PreBloom` all year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `cutoff` is
/// outside 1..=12.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(season_for_month(6, 6).unwrap(), Season::PreBloom);
/// assert_eq!(season_for_month(7, 6).unwrap(), Season::Summer);
/// ```
pub fn season_for_month(month: u32, cutoff: u32) -> Result<Season, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    if !(1..=12).contains(&cutoff) {
        return Err(CalendarError::InvalidMonth { month: cutoff });
    }
    if month <= cutoff {
        Ok(Season::PreBloom)
    } else {
        Ok(Season::Summer)
    }
}

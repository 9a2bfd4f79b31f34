//! Treatment-date parsing and elapsed-day arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CalendarError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses a date cell with a `strftime`-style format.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the text does not match the
/// format or names a day that does not exist.
pub fn parse_date(raw: &str, format: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw.trim(), format).map_err(|_| CalendarError::InvalidDate {
        value: raw.to_string(),
        format: format.to_string(),
    })
}

/// Returns midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole days between the start of `date` and `now`, rounded down.
///
/// Negative when `date` lies after `now`.
pub fn days_elapsed(now: NaiveDateTime, date: NaiveDate) -> i64 {
    let seconds = (now - start_of_day(date)).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY)
}

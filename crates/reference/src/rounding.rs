//! Rounding rules for derived thresholds.
//!
//! Both rules round half to even, so `10.5` days becomes `10` and `2.25` mm
//! becomes `2.2`.

/// Rounds a rain amount to one decimal place.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Rounds a day count to a whole number of days, saturating at zero.
pub fn round_days(value: f64) -> u32 {
    let rounded = value.round_ties_even();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

//! Weather series file adapter.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use spint_reconcile::WeatherObservation;
use tracing::{debug, info, warn};

use crate::delimited::{TableFormat, read_table};
use crate::error::IoError;
use crate::source::WeatherSource;
use crate::validate::ValidationCollector;

/// Layout of `wet_data + " " + wet_ora` in the station export, whose time
/// column is ordered seconds, hours, minutes.
pub const STATION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %S:%H:%M";

/// Naive layouts tried when no timestamp format is configured.
const AUTO_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Parses timestamps into the local reference frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParser {
    format: Option<String>,
    offset: FixedOffset,
}

impl TimestampParser {
    pub fn new(format: Option<String>, offset: FixedOffset) -> Self {
        Self { format, offset }
    }

    /// Parses one timestamp.
    ///
    /// Offset-carrying values are converted to the reference offset; naive
    /// values are taken as already local.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        match &self.format {
            Some(fmt) if fmt.contains("%z") || fmt.contains("%:z") || fmt.contains("%#z") => {
                DateTime::parse_from_str(raw, fmt).ok().map(|dt| self.localize(dt))
            }
            Some(fmt) => NaiveDateTime::parse_from_str(raw, fmt).ok(),
            None => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| self.localize(dt))
                .or_else(|| {
                    AUTO_FORMATS
                        .iter()
                        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                }),
        }
    }

    fn localize(&self, dt: DateTime<FixedOffset>) -> NaiveDateTime {
        dt.with_timezone(&self.offset).naive_local()
    }
}

/// Reads precipitation observations from a delimited file.
///
/// Defaults match the station export: `;` separated with a decimal comma,
/// date and time in `wet_data` / `wet_ora` parsed with
/// [`STATION_TIMESTAMP_FORMAT`], and precipitation in tenths of a
/// millimetre in `wet_niederschl`. The reference offset defaults to
/// `+01:00` and must be the frame of the run's `now`.
#[derive(Debug, Clone)]
pub struct CsvWeatherSource {
    path: Option<PathBuf>,
    format: TableFormat,
    timestamp_columns: Vec<String>,
    timestamp_format: Option<String>,
    precipitation_column: String,
    decimal_comma: bool,
    scale: f64,
    utc_offset: FixedOffset,
}

impl CsvWeatherSource {
    /// Creates a source; `None` means no weather file is configured.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            format: TableFormat::default().with_delimiter(';'),
            timestamp_columns: vec!["wet_data".to_string(), "wet_ora".to_string()],
            timestamp_format: Some(STATION_TIMESTAMP_FORMAT.to_string()),
            precipitation_column: "wet_niederschl".to_string(),
            decimal_comma: true,
            scale: 0.1,
            utc_offset: FixedOffset::east_opt(3600).unwrap_or_else(|| Utc.fix()),
        }
    }

    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the column(s) joined with a space to form the timestamp.
    pub fn with_timestamp_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timestamp_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the timestamp layout; `None` auto-detects RFC 3339 and common
    /// naive layouts.
    pub fn with_timestamp_format(mut self, format: Option<String>) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn with_precipitation_column(mut self, column: impl Into<String>) -> Self {
        self.precipitation_column = column.into();
        self
    }

    pub fn with_decimal_comma(mut self, decimal_comma: bool) -> Self {
        self.decimal_comma = decimal_comma;
        self
    }

    /// Sets the factor converting stored values to millimetres.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Validates this source.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem.
    pub fn validate(&self) -> Result<(), IoError> {
        self.format.validate()?;
        let mut c = ValidationCollector::new();
        if self.timestamp_columns.is_empty() {
            c.push("at least one timestamp column is required");
        }
        for col in &self.timestamp_columns {
            c.require_name("timestamp", col);
        }
        c.require_name("precipitation", &self.precipitation_column);
        if !self.scale.is_finite() || self.scale <= 0.0 {
            c.push(format!("scale must be finite and positive, got {}", self.scale));
        }
        c.finish()
    }

    fn parse_amount(&self, raw: &str) -> Option<f64> {
        let normalized = if self.decimal_comma {
            raw.replace(',', ".")
        } else {
            raw.to_string()
        };
        normalized.parse::<f64>().ok().map(|v| v * self.scale)
    }
}

impl WeatherSource for CsvWeatherSource {
    fn fetch_weather(&self) -> Result<Option<Vec<WeatherObservation>>, IoError> {
        let Some(path) = &self.path else {
            info!("no weather file configured");
            return Ok(None);
        };
        self.validate()?;
        let table = read_table(path, "weather", &self.format)?;

        let mut names: Vec<&str> = self.timestamp_columns.iter().map(String::as_str).collect();
        names.push(&self.precipitation_column);
        let missing: Vec<String> = names
            .iter()
            .filter(|n| table.column(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IoError::MissingColumns {
                names: missing,
                path: path.clone(),
            });
        }
        let ts_cols: Vec<usize> = self
            .timestamp_columns
            .iter()
            .filter_map(|n| table.column(n))
            .collect();
        let precip_col = table.column(&self.precipitation_column).unwrap_or_default();

        let parser = TimestampParser::new(self.timestamp_format.clone(), self.utc_offset);
        let mut observations = Vec::with_capacity(table.n_rows());
        let mut blank = 0usize;
        for row in 0..table.n_rows() {
            let raw_amount = table.cell(row, precip_col);
            if raw_amount.is_empty() {
                blank += 1;
                continue;
            }
            let raw_ts: Vec<&str> = ts_cols.iter().map(|&c| table.cell(row, c)).collect();
            let raw_ts = raw_ts.join(" ");
            let timestamp = parser.parse(&raw_ts).ok_or_else(|| IoError::InvalidTime {
                reason: format!("{} row {}: '{raw_ts}'", path.display(), row + 1),
            })?;
            let precipitation_mm = self.parse_amount(raw_amount).ok_or_else(|| IoError::InvalidNumber {
                path: path.clone(),
                row: row + 1,
                column: self.precipitation_column.clone(),
                value: raw_amount.to_string(),
            })?;
            observations.push(WeatherObservation::new(timestamp, precipitation_mm));
        }

        if blank > 0 {
            warn!(blank, "weather rows without precipitation skipped");
        }
        debug!(offset = %self.utc_offset, scale = self.scale, "weather parsing settings");
        info!(n_observations = observations.len(), path = %path.display(), "fetched weather series");
        Ok(Some(observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn auto_naive_formats() {
        let p = TimestampParser::new(None, offset(1));
        assert_eq!(p.parse("2024-05-03 14:30"), Some(at(14, 30)));
        assert_eq!(p.parse("2024-05-03 14:30:00"), Some(at(14, 30)));
        assert_eq!(p.parse("03.05.2024 14:30"), Some(at(14, 30)));
        assert_eq!(p.parse("gestern"), None);
    }

    #[test]
    fn rfc3339_localized_to_reference_offset() {
        let p = TimestampParser::new(None, offset(2));
        assert_eq!(p.parse("2024-05-03T12:30:00Z"), Some(at(14, 30)));
        assert_eq!(p.parse("2024-05-03T15:30:00+03:00"), Some(at(14, 30)));
    }

    #[test]
    fn explicit_offset_format() {
        let p = TimestampParser::new(Some("%Y-%m-%d %H:%M %z".to_string()), offset(1));
        assert_eq!(p.parse("2024-05-03 15:30 +0200"), Some(at(14, 30)));
    }

    #[test]
    fn explicit_naive_format() {
        let p = TimestampParser::new(Some("%d/%m/%Y %H:%M".to_string()), offset(1));
        assert_eq!(p.parse("03/05/2024 14:30"), Some(at(14, 30)));
    }

    #[test]
    fn station_layout_reads_seconds_first() {
        let p = TimestampParser::new(Some(STATION_TIMESTAMP_FORMAT.to_string()), offset(1));
        assert_eq!(p.parse("2024-05-03 00:14:30"), Some(at(14, 30)));
    }

    #[test]
    fn utc_stamp_crosses_midnight_into_reference_day() {
        let p = TimestampParser::new(None, offset(2));
        let local = p.parse("2024-05-02T22:30:00Z").unwrap();
        assert_eq!(local, at(0, 30));
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn amount_scaling_and_decimal_comma() {
        let src = CsvWeatherSource::new(None);
        let v = src.parse_amount("12,5").unwrap();
        assert!((v - 1.25).abs() < 1e-12);
        let src = CsvWeatherSource::new(None).with_decimal_comma(false).with_scale(1.0);
        assert!(src.parse_amount("12,5").is_none());
    }

    #[test]
    fn validate_collects_all_problems() {
        let src = CsvWeatherSource::new(None)
            .with_timestamp_columns(Vec::<String>::new())
            .with_precipitation_column("")
            .with_scale(0.0);
        let err = src.validate().unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 3, .. }));
    }

    #[test]
    fn no_path_is_unavailable() {
        assert!(CsvWeatherSource::new(None).fetch_weather().unwrap().is_none());
    }
}

//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use spint_calendar::{Season, season_for_month, start_of_day};
use spint_io::{
    CsvTreatmentSource, CsvWeatherSource, Encoding, ReferenceFiles, TableFormat, TreatmentColumns,
};
use spint_reconcile::ReconcileConfig;
use spint_reference::ReferenceConfig;

use crate::config::*;

/// Parses a delimiter setting: a single character, or `"tab"` / `"\t"`.
pub fn parse_delimiter(s: &str) -> Result<char> {
    if s == "\t" || s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("delimiter must be a single character, got {s:?}"),
    }
}

/// Parses an encoding name into the corresponding enum variant.
pub fn parse_encoding(s: &str) -> Result<Encoding> {
    s.parse::<Encoding>()
        .with_context(|| format!("unknown encoding: {s:?}"))
}

/// Parses a UTC offset such as `+01:00`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    match s.trim().parse::<FixedOffset>() {
        Ok(offset) => Ok(offset),
        Err(e) => bail!("invalid UTC offset {s:?}: {e}"),
    }
}

/// Resolves the reference instant of a run in the `offset` frame.
///
/// An explicit value wins over the configured one; with neither the current
/// UTC time is shifted into the frame. RFC 3339 values are converted, naive
/// values are taken as already in the frame, and a bare date means midnight.
pub fn parse_now(
    cli: Option<&str>,
    configured: Option<&str>,
    offset: FixedOffset,
) -> Result<NaiveDateTime> {
    let Some(raw) = cli.or(configured) else {
        return Ok(Utc::now().with_timezone(&offset).naive_local());
    };
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&offset).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(start_of_day(date)),
        Err(_) => bail!(
            "invalid reference instant {raw:?} (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"
        ),
    }
}

/// Picks the active season: an explicit label wins over the configured
/// one, otherwise the month of `now` is compared with `cutoff`.
pub fn resolve_season(
    cli: Option<&str>,
    configured: Option<&str>,
    now: NaiveDateTime,
    cutoff: u32,
) -> Result<Season> {
    match cli.or(configured) {
        Some(label) => label
            .parse::<Season>()
            .with_context(|| format!("invalid season override: {label:?}")),
        None => season_for_month(now.month(), cutoff).context("invalid season cutoff"),
    }
}

/// Parses the configured reference frame.
pub fn reference_offset(config: &SpintConfig) -> Result<FixedOffset> {
    parse_utc_offset(&config.general.utc_offset)
}

/// Builds a [`ReferenceConfig`] for the active season.
pub fn build_reference_config(config: &SpintConfig, season: Season) -> ReferenceConfig {
    let mut cfg = ReferenceConfig::new(season).with_t1_factor(config.thresholds.t1_factor);
    if let Some(ref substances) = config.reference.season_specific_substances {
        cfg = cfg.with_season_specific_substances(substances.iter().cloned());
    }
    if let Some(ref tiers) = config.reference.tier_columns {
        cfg = cfg.with_tier_columns(tiers.iter().cloned());
    }
    cfg
}

/// Builds a [`ReconcileConfig`] from the threshold and normalization sections.
///
/// Configured substance overrides are added to the built-in table.
pub fn build_reconcile_config(config: &SpintConfig) -> ReconcileConfig {
    let mut cfg = ReconcileConfig::new()
        .with_t1_factor(config.thresholds.t1_factor)
        .with_default_rain_mm(config.thresholds.default_mm)
        .with_default_interval_days(config.thresholds.default_days)
        .with_date_format(config.normalize.date_format.clone());
    if let Some(ref purposes) = config.normalize.relevant_purposes {
        cfg = cfg.with_relevant_purposes(purposes.iter().cloned());
    }
    for (substance, purpose) in &config.normalize.substance_overrides {
        cfg = cfg.with_substance_override(substance, purpose.clone());
    }
    if let Some(ref rewrites) = config.normalize.plot_rewrites {
        cfg = cfg.with_plot_rewrites(rewrites.iter().map(|(f, t)| (f.clone(), t.clone())));
    }
    cfg
}

/// Builds the reference file locations.
pub fn build_reference_files(config: &SpintConfig) -> Result<ReferenceFiles> {
    let encoding = parse_encoding(&config.reference.encoding)?;
    Ok(ReferenceFiles::new(config.paths.reference_dir.clone())
        .with_rain_file(config.reference.rain_file.clone())
        .with_susceptibility_file(config.reference.susceptibility_file.clone())
        .with_interval_file(config.reference.interval_file.clone())
        .with_encoding(encoding))
}

/// Builds the treatment log reader for `path`.
pub fn build_treatment_source(t: &TreatmentsToml, path: &Path) -> Result<CsvTreatmentSource> {
    let format = TableFormat::default()
        .with_delimiter(parse_delimiter(&t.delimiter)?)
        .with_encoding(parse_encoding(&t.encoding)?);
    let columns = TreatmentColumns {
        plot: t.plot_column.clone(),
        substance: t.substance_column.clone(),
        purpose: t.purpose_column.clone(),
        date: t.date_column.clone(),
    };
    let source = CsvTreatmentSource::new(path)
        .with_format(format)
        .with_columns(columns);
    source.validate()?;
    Ok(source)
}

/// Builds the weather reader; `None` marks weather data as unavailable.
///
/// Offset-carrying timestamps are shifted into `offset`, the frame of `now`.
pub fn build_weather_source(
    w: &WeatherToml,
    path: Option<PathBuf>,
    offset: FixedOffset,
) -> Result<CsvWeatherSource> {
    let format = TableFormat::default()
        .with_delimiter(parse_delimiter(&w.delimiter)?)
        .with_encoding(parse_encoding(&w.encoding)?);
    let timestamp_format = match w.timestamp_format.trim() {
        "" => None,
        fmt => Some(fmt.to_string()),
    };
    let source = CsvWeatherSource::new(path)
        .with_format(format)
        .with_timestamp_columns(w.timestamp_columns.iter().cloned())
        .with_timestamp_format(timestamp_format)
        .with_precipitation_column(w.precipitation_column.clone())
        .with_decimal_comma(w.decimal_comma)
        .with_scale(w.scale)
        .with_utc_offset(offset);
    source.validate()?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn delimiter_variants() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn encoding_names() {
        assert_eq!(parse_encoding("latin-1").unwrap(), Encoding::Latin1);
        assert_eq!(parse_encoding("UTF-8").unwrap(), Encoding::Utf8);
        assert!(parse_encoding("cp1252").is_err());
    }

    #[test]
    fn utc_offset_parses() {
        assert_eq!(parse_utc_offset("+01:00").unwrap().local_minus_utc(), 3600);
        assert!(parse_utc_offset("CET").is_err());
    }

    fn cest() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn now_prefers_cli_value() {
        let now = parse_now(Some("2024-05-15T08:30:00"), Some("2023-01-01"), cest()).unwrap();
        assert_eq!(now.year(), 2024);
        assert_eq!(now.hour(), 8);
    }

    #[test]
    fn bare_date_is_midnight() {
        let now = parse_now(None, Some("2024-07-01"), cest()).unwrap();
        assert_eq!(now.month(), 7);
        assert_eq!(now.hour(), 0);
    }

    #[test]
    fn invalid_now_rejected() {
        assert!(parse_now(Some("15.05.2024"), None, cest()).is_err());
    }

    #[test]
    fn utc_now_crosses_midnight_into_reference_day() {
        let now = parse_now(Some("2024-05-02T22:30:00Z"), None, cest()).unwrap();
        assert_eq!(now.day(), 3);
        assert_eq!(now.hour(), 0);
        assert_eq!(now.minute(), 30);
    }

    #[test]
    fn wall_clock_default_uses_reference_frame() {
        let before = Utc::now().with_timezone(&cest()).naive_local();
        let now = parse_now(None, None, cest()).unwrap();
        let after = Utc::now().with_timezone(&cest()).naive_local();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn empty_timestamp_format_means_auto_detect() {
        let mut config = SpintConfig::default();
        config.weather.timestamp_format = String::new();
        let offset = reference_offset(&config).unwrap();
        assert!(build_weather_source(&config.weather, None, offset).is_ok());
    }

    #[test]
    fn season_from_cutoff_or_override() {
        let june = parse_now(Some("2024-06-30"), None, cest()).unwrap();
        assert_eq!(resolve_season(None, None, june, 6).unwrap(), Season::PreBloom);
        assert_eq!(
            resolve_season(None, Some("Sommer"), june, 6).unwrap(),
            Season::Summer
        );
        assert_eq!(
            resolve_season(Some("Vorblüte"), Some("Sommer"), june, 6).unwrap(),
            Season::PreBloom
        );
        assert!(resolve_season(Some("Winter"), None, june, 6).is_err());
        assert!(resolve_season(None, None, june, 13).is_err());
    }

    #[test]
    fn reconcile_config_merges_overrides() {
        let mut config = SpintConfig::default();
        config
            .normalize
            .substance_overrides
            .insert("Kalzium Plus".to_string(), "Ca-Düngung".to_string());
        let cfg = build_reconcile_config(&config);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.purpose_override("kalzium plus"), Some("Ca-Düngung"));
        assert_eq!(cfg.purpose_override("EPSO Top"), Some("Bittersalz"));
    }

    #[test]
    fn reference_config_carries_season() {
        let mut config = SpintConfig::default();
        config.reference.season_specific_substances = Some(vec!["Topas".to_string()]);
        let cfg = build_reference_config(&config, Season::Summer);
        assert_eq!(cfg.season(), Season::Summer);
        assert!(cfg.season_specific_substances().contains("Topas"));
    }

    #[test]
    fn default_sources_build() {
        let config = SpintConfig::default();
        assert!(build_treatment_source(&config.treatments, Path::new("log.csv")).is_ok());
        let offset = reference_offset(&config).unwrap();
        assert_eq!(offset.local_minus_utc(), 3600);
        assert!(build_weather_source(&config.weather, None, offset).is_ok());
        assert!(build_reference_files(&config).is_ok());
    }
}

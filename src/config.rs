use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level spint configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpintConfig {
    /// Run-wide settings.
    #[serde(default)]
    pub general: GeneralToml,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsToml,

    /// Threshold factors and fallbacks.
    #[serde(default)]
    pub thresholds: ThresholdsToml,

    /// Treatment normalization rules.
    #[serde(default)]
    pub normalize: NormalizeToml,

    /// Reference table files.
    #[serde(default)]
    pub reference: ReferenceToml,

    /// Treatment log layout.
    #[serde(default)]
    pub treatments: TreatmentsToml,

    /// Weather file layout.
    #[serde(default)]
    pub weather: WeatherToml,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<SpintConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralToml {
    /// Fixed reference instant in the `utc_offset` frame; the current time
    /// is used when unset.
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default = "default_season_month_cutoff")]
    pub season_month_cutoff: u32,
    /// Season label overriding the month cutoff.
    #[serde(default)]
    pub season: Option<String>,
    /// Reference frame shared by `now`, treatment dates and weather
    /// timestamps. Must match the zone the treatment dates are recorded in.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for GeneralToml {
    fn default() -> Self {
        Self {
            now: None,
            year: None,
            season_month_cutoff: default_season_month_cutoff(),
            season: None,
            utc_offset: default_utc_offset(),
        }
    }
}

fn default_season_month_cutoff() -> u32 {
    6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsToml {
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,
    pub treatments: Option<PathBuf>,
    pub weather: Option<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Optional CSV copy of the reconciled records.
    pub records_csv: Option<PathBuf>,
}

impl Default for PathsToml {
    fn default() -> Self {
        Self {
            reference_dir: default_reference_dir(),
            treatments: None,
            weather: None,
            output: default_output(),
            records_csv: None,
        }
    }
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_output() -> PathBuf {
    PathBuf::from("spint-report.json")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsToml {
    #[serde(default = "default_t1_factor")]
    pub t1_factor: f64,
    #[serde(default = "default_mm")]
    pub default_mm: f64,
    #[serde(default = "default_days")]
    pub default_days: u32,
}

impl Default for ThresholdsToml {
    fn default() -> Self {
        Self {
            t1_factor: default_t1_factor(),
            default_mm: default_mm(),
            default_days: default_days(),
        }
    }
}

fn default_t1_factor() -> f64 {
    0.75
}
fn default_mm() -> f64 {
    30.0
}
fn default_days() -> u32 {
    14
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeToml {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Replaces the built-in tracked purposes when set.
    #[serde(default)]
    pub relevant_purposes: Option<Vec<String>>,
    /// Extra substance → purpose overrides, added to the built-in table.
    #[serde(default)]
    pub substance_overrides: BTreeMap<String, String>,
    /// Replaces the built-in plot-name rewrites when set.
    #[serde(default)]
    pub plot_rewrites: Option<BTreeMap<String, String>>,
}

impl Default for NormalizeToml {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            relevant_purposes: None,
            substance_overrides: BTreeMap::new(),
            plot_rewrites: None,
        }
    }
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceToml {
    #[serde(default = "default_latin1")]
    pub encoding: String,
    #[serde(default = "default_rain_file")]
    pub rain_file: String,
    #[serde(default = "default_susceptibility_file")]
    pub susceptibility_file: String,
    #[serde(default = "default_interval_file")]
    pub interval_file: String,
    #[serde(default)]
    pub season_specific_substances: Option<Vec<String>>,
    #[serde(default)]
    pub tier_columns: Option<Vec<String>>,
}

impl Default for ReferenceToml {
    fn default() -> Self {
        Self {
            encoding: default_latin1(),
            rain_file: default_rain_file(),
            susceptibility_file: default_susceptibility_file(),
            interval_file: default_interval_file(),
            season_specific_substances: None,
            tier_columns: None,
        }
    }
}

fn default_latin1() -> String {
    "latin-1".to_string()
}
fn default_utf8() -> String {
    "utf-8".to_string()
}
fn default_rain_file() -> String {
    "regenbestaendigkeit.csv".to_string()
}
fn default_susceptibility_file() -> String {
    "sortenanfaelligkeit.csv".to_string()
}
fn default_interval_file() -> String {
    "behandlungsintervall.csv".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreatmentsToml {
    #[serde(default = "default_comma")]
    pub delimiter: String,
    #[serde(default = "default_utf8")]
    pub encoding: String,
    #[serde(default = "default_plot_column")]
    pub plot_column: String,
    #[serde(default = "default_substance_column")]
    pub substance_column: String,
    #[serde(default = "default_purpose_column")]
    pub purpose_column: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
}

impl Default for TreatmentsToml {
    fn default() -> Self {
        Self {
            delimiter: default_comma(),
            encoding: default_utf8(),
            plot_column: default_plot_column(),
            substance_column: default_substance_column(),
            purpose_column: default_purpose_column(),
            date_column: default_date_column(),
        }
    }
}

fn default_comma() -> String {
    ",".to_string()
}
fn default_plot_column() -> String {
    "Anlage".to_string()
}
fn default_substance_column() -> String {
    "Mittel".to_string()
}
fn default_purpose_column() -> String {
    "Grund".to_string()
}
fn default_date_column() -> String {
    "Datum".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherToml {
    #[serde(default = "default_semicolon")]
    pub delimiter: String,
    #[serde(default = "default_utf8")]
    pub encoding: String,
    #[serde(default = "default_timestamp_columns")]
    pub timestamp_columns: Vec<String>,
    /// Empty means auto-detect.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_precipitation_column")]
    pub precipitation_column: String,
    #[serde(default = "default_true")]
    pub decimal_comma: bool,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for WeatherToml {
    fn default() -> Self {
        Self {
            delimiter: default_semicolon(),
            encoding: default_utf8(),
            timestamp_columns: default_timestamp_columns(),
            timestamp_format: default_timestamp_format(),
            precipitation_column: default_precipitation_column(),
            decimal_comma: true,
            scale: default_scale(),
        }
    }
}

fn default_semicolon() -> String {
    ";".to_string()
}
fn default_timestamp_columns() -> Vec<String> {
    vec!["wet_data".to_string(), "wet_ora".to_string()]
}
fn default_timestamp_format() -> String {
    spint_io::STATION_TIMESTAMP_FORMAT.to_string()
}
fn default_precipitation_column() -> String {
    "wet_niederschl".to_string()
}
fn default_true() -> bool {
    true
}
fn default_scale() -> f64 {
    0.1
}
fn default_utc_offset() -> String {
    "+01:00".to_string()
}

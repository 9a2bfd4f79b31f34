//! Run command: reconcile the treatment log and print the status report.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tracing::{info, info_span, warn};

use spint_io::{TreatmentSource, WeatherSource, write_json, write_records_csv};
use spint_reconcile::{MissingReferenceReport, ReconciledRecord, RunStats, reconcile};
use spint_report::{StatusReport, build_report, render_text, to_json};

use crate::cli::RunArgs;
use crate::config;
use crate::convert;
use crate::references_cmd::load_references;

/// Everything a run writes to its JSON output.
#[derive(Debug, Serialize)]
struct RunOutput<'a> {
    generated_at: NaiveDateTime,
    season: &'static str,
    records: &'a [ReconciledRecord],
    missing: &'a MissingReferenceReport,
    stats: &'a RunStats,
    report: &'a StatusReport,
}

/// Run the full reconciliation pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    // 1. Load project TOML
    let config = config::load(&args.config)?;

    // 2. Capture the reference instant once for the whole run
    let offset = convert::reference_offset(&config)?;
    let now = convert::parse_now(args.now.as_deref(), config.general.now.as_deref(), offset)?;
    let season = convert::resolve_season(
        args.season.as_deref(),
        config.general.season.as_deref(),
        now,
        config.general.season_month_cutoff,
    )?;
    let year = args.year.or(config.general.year).unwrap_or(now.year());
    info!(now = %now, season = %season, year, "starting run");

    // 3. Reference data
    let refs = load_references(&config, season)?;

    // 4. Treatment log
    let treatments_path: PathBuf = args
        .treatments
        .or_else(|| config.paths.treatments.clone())
        .ok_or_else(|| {
            anyhow!("no treatment log: set [paths].treatments in config or use --treatments")
        })?;
    let treatment_source = convert::build_treatment_source(&config.treatments, &treatments_path)?;
    let raw = treatment_source.fetch_treatments(year).with_context(|| {
        format!(
            "failed to read treatment log: {}",
            treatments_path.display()
        )
    })?;
    info!(n_rows = raw.len(), "treatment log loaded");

    // 5. Weather; a failing source degrades to "unavailable"
    let weather_path = args.weather.or_else(|| config.paths.weather.clone());
    let weather_source = convert::build_weather_source(&config.weather, weather_path, offset)?;
    let weather = match weather_source.fetch_weather() {
        Ok(Some(obs)) => {
            info!(n_observations = obs.len(), "weather loaded");
            Some(obs)
        }
        Ok(None) => {
            warn!("no weather source configured; rainfall will be missing");
            None
        }
        Err(e) => {
            warn!(error = %e, "weather unavailable; rainfall will be missing");
            None
        }
    };

    // 6. Reconcile
    let reconcile_cfg = convert::build_reconcile_config(&config);
    let outcome = reconcile(raw, weather.as_deref(), &refs, &reconcile_cfg, now)
        .context("reconciliation failed")?;
    if !outcome.missing.is_empty() {
        warn!(
            rain_substances = ?outcome.missing.rain_substances,
            interval_pairs = outcome.missing.interval_pairs.len(),
            "reference thresholds missing; defaults applied"
        );
    }

    // 7. Report
    let report = build_report(&outcome.records, now);
    let output = RunOutput {
        generated_at: now,
        season: season.label(),
        records: &outcome.records,
        missing: &outcome.missing,
        stats: &outcome.stats,
        report: &report,
    };
    let output_path = args.output.unwrap_or_else(|| config.paths.output.clone());
    write_json(&output_path, &output)
        .with_context(|| format!("failed to write output: {}", output_path.display()))?;

    if let Some(ref csv_path) = config.paths.records_csv {
        write_records_csv(csv_path, &outcome.records)
            .with_context(|| format!("failed to write records: {}", csv_path.display()))?;
    }

    if args.json {
        let json = to_json(&report).context("failed to serialize status report")?;
        println!("{json}");
    } else {
        print!("{}", render_text(&report));
    }
    info!(
        n_records = outcome.records.len(),
        path = %output_path.display(),
        "run complete"
    );
    Ok(())
}

//! References command: load and validate the reference tables only.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use spint_calendar::Season;
use spint_io::read_reference_tables;
use spint_reference::{ReferenceData, load_reference_data};

use crate::cli::ReferencesArgs;
use crate::config::{self, SpintConfig};
use crate::convert;

/// Reads and derives every reference table for `season`.
pub fn load_references(config: &SpintConfig, season: Season) -> Result<ReferenceData> {
    let files = convert::build_reference_files(config)?;
    info!(dir = %files.dir().display(), season = %season, "reading reference tables");
    let tables = read_reference_tables(&files).with_context(|| {
        format!("failed to read reference tables from {}", files.dir().display())
    })?;

    let ref_cfg = convert::build_reference_config(config, season);
    load_reference_data(
        &tables.rain,
        &tables.susceptibility,
        &tables.interval,
        &ref_cfg,
    )
    .context("invalid reference data")
}

/// Validate the reference tables and print a summary.
pub fn run(args: ReferencesArgs) -> Result<()> {
    let _cmd = info_span!("references").entered();
    let config = config::load(&args.config)?;

    let offset = convert::reference_offset(&config)?;
    let now = convert::parse_now(args.now.as_deref(), config.general.now.as_deref(), offset)?;
    let season = convert::resolve_season(
        args.season.as_deref(),
        config.general.season.as_deref(),
        now,
        config.general.season_month_cutoff,
    )?;

    let refs = load_references(&config, season)?;

    println!("Saison: {season}");
    println!("Regenbeständigkeit: {} Mittel", refs.rain.len());
    println!("Sortenanfälligkeit: {} Sorten", refs.susceptibility.len());
    println!(
        "Behandlungsintervalle: {} Paare (Mittel, Sorte)",
        refs.intervals.len()
    );
    let fmt_days = |d: Option<u32>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    for interval in refs.intervals.iter() {
        let tier = refs.susceptibility.tier(&interval.variety).unwrap_or("?");
        println!(
            "  {} / {} ({tier}): {} - {} Tage",
            interval.substance,
            interval.variety,
            fmt_days(interval.min_days),
            fmt_days(interval.max_days)
        );
    }
    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// spint plant-protection status tool.
#[derive(Parser)]
#[command(
    name = "spint",
    version,
    about = "Reconcile treatment logs against rain and interval thresholds"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full reconciliation pipeline and print the status report.
    Run(RunArgs),
    /// Load and validate the reference tables only.
    References(ReferencesArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "spint.toml")]
    pub config: PathBuf,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the treatment log path from config.
    #[arg(short, long)]
    pub treatments: Option<PathBuf>,

    /// Override the weather file path from config.
    #[arg(short, long)]
    pub weather: Option<PathBuf>,

    /// Reference instant (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); defaults to now.
    #[arg(long)]
    pub now: Option<String>,

    /// Season year passed to the treatment source; defaults to the year of `now`.
    #[arg(long)]
    pub year: Option<i32>,

    /// Season label (`Vorblüte` or `Sommer`) overriding the month cutoff.
    #[arg(long)]
    pub season: Option<String>,

    /// Print the status report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `references` subcommand.
#[derive(clap::Args)]
pub struct ReferencesArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "spint.toml")]
    pub config: PathBuf,

    /// Reference instant used to pick the season; defaults to now.
    #[arg(long)]
    pub now: Option<String>,

    /// Season label (`Vorblüte` or `Sommer`) overriding the month cutoff.
    #[arg(long)]
    pub season: Option<String>,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tankcast daily tank-level forecaster.
#[derive(Parser)]
#[command(
    name = "tankcast",
    version,
    about = "Daily tank-level forecasting with seasonal decomposition and SARIMAX"
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
    /// Forecast every (or selected) tank column.
    Forecast(ForecastArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file [default: tankcast.toml if present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override holiday file path from config.
    #[arg(long)]
    pub holidays: Option<PathBuf>,

    /// Override output JSON path from config (stdout when neither is set).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Forecast the next N days after the last observation.
    #[arg(
        short = 'n',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with_all = ["start", "end"]
    )]
    pub days: Option<u32>,

    /// First day of an explicit range (dd-mm-YYYY).
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last day of an explicit range (dd-mm-YYYY), inclusive.
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Only forecast these columns (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Fit the order-search grid on one thread.
    #[arg(long)]
    pub sequential: bool,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fincast ARIMA inflation forecaster.
#[derive(Parser)]
#[command(
    name = "fincast",
    version,
    about = "ARIMA forecasting of annual inflation rates"
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
    /// Fit or select a model and forecast future periods.
    Forecast(ForecastArgs),
    /// Run the order search and print the ranked candidates.
    Select(SelectArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to the input series (CSV with header, or JSON).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of periods to forecast.
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// CSV column holding the series values.
    #[arg(long, default_value = "value")]
    pub column: String,

    /// Path for the JSON report. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fit a fixed order instead of searching, as `P,D,Q`.
    #[arg(long, value_name = "P,D,Q")]
    pub fixed: Option<String>,

    /// Override the selection criterion (`aic` or `bic`).
    #[arg(long)]
    pub criterion: Option<String>,
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to the input series (CSV with header, or JSON).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV column holding the series values.
    #[arg(long, default_value = "value")]
    pub column: String,

    /// Override the selection criterion (`aic` or `bic`).
    #[arg(long)]
    pub criterion: Option<String>,
}

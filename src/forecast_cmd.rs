//! Forecast command: load a series, fit or select a model, write a JSON report.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use fincast_arima::{ArimaFit, arima_forecast};

use crate::cli::ForecastArgs;
use crate::config::FincastConfig;
use crate::{convert, input};

/// JSON report written by `fincast forecast`.
#[derive(Serialize)]
struct ForecastReport<'a> {
    steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    years: Option<Vec<i64>>,
    predictions: &'a [f64],
    model: &'a ArimaFit,
}

/// Run the forecast pipeline.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

    // 1. Config and overrides
    let config = FincastConfig::load_or_default(args.config.as_deref())?;
    let options = convert::build_forecast_options(
        &config,
        args.fixed.as_deref(),
        args.criterion.as_deref(),
    )?;
    let steps = args.steps.unwrap_or(config.forecast.steps);

    // 2. Input series
    let series = load_checked(&args.input, &args.column)?;

    // 3. Fit and project
    let result = arima_forecast(&series.values, steps, &options);
    info!(model = %result.model, steps, "forecast ready");

    // 4. Report
    let report = ForecastReport {
        steps,
        years: series.forecast_years(steps),
        predictions: &result.predictions,
        model: &result.model,
    };
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    write_report(args.output.as_deref(), &json)
}

/// Loads the series and rejects empty or non-finite input.
pub(crate) fn load_checked(path: &Path, column: &str) -> Result<input::Series> {
    info!(path = %path.display(), "reading series");
    let series = input::load_series(path, column)?;
    fincast_arima::validate_series(&series.values)
        .with_context(|| format!("unusable series in {}", path.display()))?;

    let values = &series.values;
    if let Some((min, max)) = fincast_stats::finite_range(values) {
        info!(
            n = values.len(),
            mean = fincast_stats::mean(values),
            sd = fincast_stats::sd(values),
            min,
            max,
            "series loaded"
        );
    }
    Ok(series)
}

fn write_report(output: Option<&Path>, json: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

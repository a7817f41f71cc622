//! Loading the historical series from CSV or JSON.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Column holding period labels in CSV input.
const YEAR_COLUMN: &str = "year";

/// A chronological series with optional year labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub values: Vec<f64>,
    pub years: Option<Vec<i64>>,
}

impl Series {
    /// Labels for the `steps` periods after the last observation.
    pub fn forecast_years(&self, steps: usize) -> Option<Vec<i64>> {
        let last = *self.years.as_ref()?.last()?;
        Some((1..=steps as i64).map(|k| last + k).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSeries {
    Bare(Vec<f64>),
    Labelled {
        values: Vec<f64>,
        #[serde(default)]
        start_year: Option<i64>,
    },
}

/// Loads a series, choosing the format by file extension (`.json`, else CSV).
pub fn load_series(path: &Path, column: &str) -> Result<Series> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_json(path)
    } else {
        load_csv(path, column)
    }
}

fn load_csv(path: &Path, column: &str) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", path.display()))?
        .clone();

    let Some(value_idx) = headers.iter().position(|h| h.trim() == column) else {
        let available: Vec<&str> = headers.iter().collect();
        bail!("column {column:?} not found in {} (available: {available:?})", path.display());
    };
    let year_idx = headers.iter().position(|h| h.trim() == YEAR_COLUMN);

    let mut values = Vec::new();
    let mut years = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // header is line 1
        let line = row + 2;
        let record = record.with_context(|| format!("failed to read CSV line {line}"))?;
        let raw = record.get(value_idx).unwrap_or("").trim();
        let value: f64 = raw
            .parse()
            .with_context(|| format!("line {line}: invalid value {raw:?} in column {column:?}"))?;
        values.push(value);

        if let Some(idx) = year_idx {
            let raw = record.get(idx).unwrap_or("").trim();
            let year: i64 = raw
                .parse()
                .with_context(|| format!("line {line}: invalid year {raw:?}"))?;
            years.push(year);
        }
    }

    Ok(Series {
        values,
        years: year_idx.map(|_| years),
    })
}

fn load_json(path: &Path) -> Result<Series> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read JSON: {}", path.display()))?;
    let parsed: JsonSeries = serde_json::from_str(&text).with_context(|| {
        format!(
            "failed to parse JSON series (expected an array of numbers or {{\"values\": [...]}}): {}",
            path.display()
        )
    })?;

    Ok(match parsed {
        JsonSeries::Bare(values) => Series {
            values,
            years: None,
        },
        JsonSeries::Labelled { values, start_year } => {
            let years = start_year.map(|start| (0..values.len() as i64).map(|i| start + i).collect());
            Series { values, years }
        }
    })
}

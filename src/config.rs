use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Fincast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FincastConfig {
    /// Forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Order search settings.
    #[serde(default)]
    pub search: SearchToml,
}

impl FincastConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Reads `path` if given, otherwise returns the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub auto: bool,
    #[serde(default = "default_order")]
    pub order: [usize; 3],
    #[serde(default = "default_criterion")]
    pub criterion: String,
    #[serde(default = "default_clamp_min")]
    pub clamp_min: f64,
    #[serde(default = "default_clamp_max")]
    pub clamp_max: f64,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            auto: true,
            order: default_order(),
            criterion: default_criterion(),
            clamp_min: default_clamp_min(),
            clamp_max: default_clamp_max(),
        }
    }
}

fn default_steps() -> usize {
    25
}
fn default_true() -> bool {
    true
}
fn default_order() -> [usize; 3] {
    [2, 1, 1]
}
fn default_criterion() -> String {
    "aic".to_string()
}
fn default_clamp_min() -> f64 {
    fincast_arima::INFLATION_BOUNDS.0
}
fn default_clamp_max() -> f64 {
    fincast_arima::INFLATION_BOUNDS.1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_max_p")]
    pub max_p: usize,
    #[serde(default = "default_max_d")]
    pub max_d: usize,
    #[serde(default = "default_max_q")]
    pub max_q: usize,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            max_p: default_max_p(),
            max_d: default_max_d(),
            max_q: default_max_q(),
        }
    }
}

fn default_max_p() -> usize {
    4
}
fn default_max_d() -> usize {
    2
}
fn default_max_q() -> usize {
    3
}

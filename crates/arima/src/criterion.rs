//! Information criteria used to rank candidate models.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ArimaError;

/// Information criterion used to rank candidate models (lower is better).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Akaike Information Criterion: `n·ln(mse) + 2k`.
    #[default]
    Aic,
    /// Bayesian Information Criterion: `n·ln(mse) + k·ln(n)`.
    Bic,
}

impl Criterion {
    /// Returns the lowercase name (`"aic"` or `"bic"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Aic => "aic",
            Criterion::Bic => "bic",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ArimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aic" => Ok(Criterion::Aic),
            "bic" => Ok(Criterion::Bic),
            other => Err(ArimaError::UnknownCriterion(other.to_string())),
        }
    }
}

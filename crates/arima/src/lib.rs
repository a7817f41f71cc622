//! # fincast-arima
//!
//! ARIMA(p,d,q) fitting, order selection and forecasting for short annual
//! series such as inflation rates. AR coefficients come from ridge-stabilised
//! least squares, MA coefficients from a fixed number of residual
//! regressions, and orders from an AIC/BIC grid search.
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaSpec::new(p, d, q)"] -->|".fit(&series)"| B["ArimaFit"]
//!     B --> C[".ar() / .ar_intercept()"]
//!     B --> D[".ma() (clamped to ±0.95)"]
//!     B --> E[".aic() / .bic() / .rmse()"]
//!     B --> F[".forecast(&series, steps)"]
//!     H["auto_arima(&series, &config)"] -->|"grid search"| B
//!     I["arima_forecast(&series, steps, &options)"] --> H
//! ```
//!
//! ## Three Usage Paths
//!
//! **Direct fit** (known orders):
//! ```ignore
//! let fit = ArimaSpec::new(2, 1, 1).fit(&series);
//! let path = fit.forecast(&series, 10);
//! ```
//!
//! **Grid search** (unknown orders):
//! ```ignore
//! let fit = auto_arima(&series, &AutoArimaConfig::new().with_criterion(Criterion::Bic));
//! ```
//!
//! **Clamped forecast** (selection and projection in one call):
//! ```ignore
//! let ArimaForecast { predictions, model } =
//!     arima_forecast(&series, 25, &ForecastOptions::default());
//! ```
//!
//! Fitting never fails. Orders the series cannot support produce a model
//! with zero coefficients and `+Infinity` diagnostics, singular normal
//! equations resolve the affected unknowns to zero, and the grid search
//! falls back to ARIMA(1,1,0) when no candidate scores finitely.
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | c | [`ArimaFit::ar_intercept()`] | Constant term on the differenced scale |
//! | phi | [`ArimaFit::ar()`] | AR coefficients: weights on past differenced values |
//! | theta | [`ArimaFit::ma()`] | MA coefficients: weights on past residuals |
//! | k | [`ArimaSpec::n_params()`] | Parameter count `p + q + 2` |
//! | AIC | [`ArimaFit::aic()`] | `n·ln(mse) + 2k` (lower = better) |
//! | BIC | [`ArimaFit::bic()`] | `n·ln(mse) + k·ln(n)` (lower = better) |

mod ar;
mod criterion;
mod diff;
mod error;
mod fit;
mod fitter;
mod forecast;
mod linalg;
mod ma;
mod selection;
mod spec;
mod validate;

pub use ar::{AR_RIDGE, ArEstimate, estimate_ar};
pub use criterion::Criterion;
pub use diff::{difference, undifference};
pub use error::ArimaError;
pub use fit::ArimaFit;
pub use fitter::fit_arima;
pub use forecast::{ArimaForecast, ForecastOptions, INFLATION_BOUNDS, arima_forecast, forecast};
pub use linalg::{PIVOT_EPSILON, solve_linear_system};
pub use ma::{MA_BOUND, MA_ITERATIONS, MA_RIDGE, MaEstimate, compute_residuals, estimate_ma};
pub use selection::{
    AutoArimaConfig, CandidateSummary, FALLBACK_ORDER, MIN_DIFF_LEN, TOP_CANDIDATES, auto_arima,
};
pub use spec::ArimaSpec;
pub use validate::validate_series;

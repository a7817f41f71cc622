//! Multi-step forecasting and the top-level forecast entry point.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::criterion::Criterion;
use crate::diff::undifference;
use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::fitter::fit_arima;
use crate::selection::{AutoArimaConfig, auto_arima};

/// Default clamp range for forecasts, in percent inflation.
pub const INFLATION_BOUNDS: (f64, f64) = (-20.0, 100.0);

/// Projects `model` `steps` periods beyond `original_series`.
///
/// The recursion runs on the differenced scale, continuing from the
/// model's differenced series and residuals. Lags that reach before the
/// start of either history count as zero, and every future residual is
/// zero. The differenced forecasts are then integrated back onto the
/// original scale, anchored on the last `d` values of `original_series`.
///
/// Values are not clamped; see [`arima_forecast()`] for that.
///
/// # Example
///
/// ```
/// use fincast_arima::{fit_arima, forecast};
///
/// let series: Vec<f64> = (0..20).map(|i| 2.0 * i as f64 + ((i * 3) % 5) as f64).collect();
/// let model = fit_arima(&series, 1, 1, 0);
/// let path = forecast(&model, &series, 4);
/// assert_eq!(path.len(), 4);
/// ```
pub fn forecast(model: &ArimaFit, original_series: &[f64], steps: usize) -> Vec<f64> {
    let (p, d, q) = model.order();
    let ar = model.ar();
    let ma = model.ma();

    let mut values = model.diff_series().to_vec();
    let mut residuals = model.residuals().to_vec();
    values.reserve(steps);
    residuals.reserve(steps);

    let mut diff_forecasts = Vec::with_capacity(steps);
    for _ in 0..steps {
        let mut next = model.ar_intercept();
        for (j, &phi) in ar.iter().take(p).enumerate() {
            next += phi * lag(&values, j);
        }
        for (j, &theta) in ma.iter().take(q).enumerate() {
            next += theta * lag(&residuals, j);
        }
        values.push(next);
        residuals.push(0.0);
        diff_forecasts.push(next);
    }

    let keep = d.max(1);
    let tail = &original_series[original_series.len().saturating_sub(keep)..];
    undifference(&diff_forecasts, tail, d)
}

/// `history[len - 1 - j]`, or zero before the start.
fn lag(history: &[f64], j: usize) -> f64 {
    history
        .len()
        .checked_sub(j + 1)
        .map_or(0.0, |idx| history[idx])
}

/// Options for [`arima_forecast()`].
///
/// By default the order is chosen by [`auto_arima()`] over the default
/// grid, ranked by AIC, and predictions are clamped to
/// [`INFLATION_BOUNDS`].
///
/// # Example
///
/// ```
/// use fincast_arima::{Criterion, ForecastOptions};
///
/// let fixed = ForecastOptions::new().with_auto(false).with_order(1, 1, 0);
/// assert!(!fixed.auto());
/// assert_eq!(fixed.order(), (1, 1, 0));
///
/// let auto_bic = ForecastOptions::new().with_criterion(Criterion::Bic);
/// assert!(auto_bic.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastOptions {
    auto: bool,
    order: (usize, usize, usize),
    search: AutoArimaConfig,
    bounds: (f64, f64),
}

impl ForecastOptions {
    /// Creates options with the defaults: automatic selection, fixed
    /// order `(2, 1, 1)` when selection is off, AIC, and
    /// [`INFLATION_BOUNDS`].
    pub fn new() -> Self {
        Self {
            auto: true,
            order: (2, 1, 1),
            search: AutoArimaConfig::new(),
            bounds: INFLATION_BOUNDS,
        }
    }

    /// Enables or disables automatic order selection.
    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    /// Sets the order used when automatic selection is off.
    pub fn with_order(mut self, p: usize, d: usize, q: usize) -> Self {
        self.order = (p, d, q);
        self
    }

    /// Sets the ranking criterion for automatic selection.
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.search = self.search.with_criterion(criterion);
        self
    }

    /// Sets the search grid bounds for automatic selection.
    pub fn with_max_orders(mut self, max_p: usize, max_d: usize, max_q: usize) -> Self {
        self.search = self.search.with_max_orders(max_p, max_d, max_q);
        self
    }

    /// Sets the clamp range applied to every prediction.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = (min, max);
        self
    }

    /// Whether the order is chosen automatically.
    pub fn auto(&self) -> bool {
        self.auto
    }

    /// Order used when automatic selection is off.
    pub fn order(&self) -> (usize, usize, usize) {
        self.order
    }

    /// Search configuration used when automatic selection is on.
    pub fn search(&self) -> &AutoArimaConfig {
        &self.search
    }

    /// Clamp range `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Validates the clamp range.
    ///
    /// # Errors
    ///
    /// Returns [`ArimaError::InvalidBounds`] if either bound is not finite
    /// or `min > max`.
    pub fn validate(&self) -> Result<(), ArimaError> {
        let (min, max) = self.bounds;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ArimaError::InvalidBounds { min, max });
        }
        Ok(())
    }
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamped predictions together with the model that produced them.
#[derive(Clone, Debug, Serialize)]
pub struct ArimaForecast {
    /// One clamped prediction per requested step.
    pub predictions: Vec<f64>,
    /// The fitted (or selected) model.
    pub model: ArimaFit,
}

/// Fits or selects a model for `series` and forecasts `steps` periods.
///
/// With `options.auto()` the model comes from [`auto_arima()`]; otherwise
/// [`fit_arima()`] is called with `options.order()`. Every prediction is
/// clamped into `options.bounds()`, so `predictions.len() == steps`
/// always holds and no value leaves the range. Bounds are not validated
/// here; call [`ForecastOptions::validate()`] first to reject them.
///
/// # Example
///
/// ```
/// use fincast_arima::{ForecastOptions, arima_forecast};
///
/// let series: Vec<f64> = (0..30)
///     .map(|i| 8.0 + 4.0 * (i as f64 * 0.6).sin() + ((i * 7) % 5) as f64 * 0.4)
///     .collect();
/// let result = arima_forecast(&series, 10, &ForecastOptions::default());
///
/// assert_eq!(result.predictions.len(), 10);
/// assert!(result.predictions.iter().all(|v| (-20.0..=100.0).contains(v)));
/// ```
#[tracing::instrument(skip(series, options), fields(n = series.len(), auto = options.auto()))]
pub fn arima_forecast(series: &[f64], steps: usize, options: &ForecastOptions) -> ArimaForecast {
    let model = if options.auto() {
        auto_arima(series, options.search())
    } else {
        let (p, d, q) = options.order();
        fit_arima(series, p, d, q)
    };

    let (min, max) = options.bounds();
    let raw = forecast(&model, series, steps);
    let predictions = clamp_predictions(raw, min, max);

    info!(order = ?model.order(), steps, "forecast complete");
    ArimaForecast { predictions, model }
}

/// Clamps every value into `[min, max]`.
///
/// A non-finite value means the fitted recursion diverged. NaN is pinned
/// to `min`, infinities to the bound on their side, and the count is
/// logged at warn level.
fn clamp_predictions(raw: Vec<f64>, min: f64, max: f64) -> Vec<f64> {
    let non_finite = raw.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        warn!(
            non_finite,
            steps = raw.len(),
            min,
            "forecast diverged to non-finite values; clamped into bounds"
        );
    }
    let clamped = raw.iter().filter(|v| !(min..=max).contains(*v)).count();
    if clamped > non_finite {
        debug!(clamped = clamped - non_finite, min, max, "predictions clamped");
    }
    raw.into_iter()
        .map(|v| if v.is_nan() { min } else { v.max(min).min(max) })
        .collect()
}

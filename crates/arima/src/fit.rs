//! Fitted ARIMA model results.

use std::fmt;

use serde::Serialize;

use crate::ar::ArEstimate;
use crate::criterion::Criterion;
use crate::ma::MaEstimate;
use crate::selection::CandidateSummary;
use crate::spec::ArimaSpec;

/// Goodness-of-fit statistics over the post-warm-up residual window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct Diagnostics {
    /// Number of residuals in the window.
    pub(crate) n: usize,
    pub(crate) mse: f64,
    pub(crate) rmse: f64,
    pub(crate) aic: f64,
    pub(crate) bic: f64,
}

impl Diagnostics {
    /// Computes MSE, RMSE, AIC and BIC from the fitted residuals.
    ///
    /// `AIC = n·ln(mse) + 2k`, `BIC = n·ln(mse) + k·ln(n)`. An empty window
    /// yields [`Diagnostics::infeasible()`].
    pub(crate) fn from_window(window: &[f64], n_params: usize) -> Self {
        let n = window.len();
        if n == 0 {
            return Self::infeasible();
        }
        let nf = n as f64;
        let k = n_params as f64;
        let mse = fincast_stats::sum_of_squares(window) / nf;
        let log_mse = mse.ln();
        Self {
            n,
            mse,
            rmse: mse.sqrt(),
            aic: nf * log_mse + 2.0 * k,
            bic: nf * log_mse + k * nf.ln(),
        }
    }

    /// All scores at `+Infinity`: nothing left to evaluate after warm-up.
    pub(crate) fn infeasible() -> Self {
        Self {
            n: 0,
            mse: f64::INFINITY,
            rmse: f64::INFINITY,
            aic: f64::INFINITY,
            bic: f64::INFINITY,
        }
    }
}

/// A fitted ARIMA(p,d,q) model produced by [`ArimaSpec::fit()`],
/// [`fit_arima()`](crate::fit_arima) or [`auto_arima()`](crate::auto_arima).
///
/// Holds the AR intercept and coefficients, the clamped MA coefficients,
/// the residuals and differenced series needed to continue the recursion,
/// and the fit diagnostics. Models from order selection also carry the
/// ranking criterion and the best-ranked candidates.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     B["ArimaFit"] --> C[".ar() / .ar_intercept()"]
///     B --> D[".ma()"]
///     B --> E[".aic() / .bic() / .rmse()"]
///     B --> F[".forecast(&series, steps)"]
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct ArimaFit {
    #[serde(flatten)]
    spec: ArimaSpec,
    ar_intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    #[serde(flatten)]
    diagnostics: Diagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    criterion: Option<Criterion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    top_candidates: Vec<CandidateSummary>,
    #[serde(skip)]
    residuals: Vec<f64>,
    #[serde(skip)]
    diff_series: Vec<f64>,
}

impl ArimaFit {
    /// Assembles a fit from its estimated parts (crate-internal constructor).
    pub(crate) fn new(
        spec: ArimaSpec,
        ar: ArEstimate,
        ma: MaEstimate,
        diff_series: Vec<f64>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            spec,
            ar_intercept: ar.intercept,
            ar: ar.coefficients,
            ma: ma.coefficients,
            diagnostics,
            criterion: None,
            top_candidates: Vec::new(),
            residuals: ma.residuals,
            diff_series,
        }
    }

    /// Attaches the order-selection outcome.
    pub(crate) fn with_selection(
        mut self,
        criterion: Criterion,
        top_candidates: Vec<CandidateSummary>,
    ) -> Self {
        self.criterion = Some(criterion);
        self.top_candidates = top_candidates;
        self
    }

    /// Returns the [`ArimaSpec`] that produced this fit.
    pub fn spec(&self) -> ArimaSpec {
        self.spec
    }

    /// Returns the `(p, d, q)` order of the fitted model.
    pub fn order(&self) -> (usize, usize, usize) {
        self.spec.order()
    }

    /// Returns the AR coefficients, lag 1 first.
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the AR intercept (constant term on the differenced scale).
    pub fn ar_intercept(&self) -> f64 {
        self.ar_intercept
    }

    /// Returns the MA coefficients, lag 1 first. Each lies in `[-0.95, 0.95]`.
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the residuals, one per differenced observation.
    ///
    /// The first `max(p, q)` entries are warm-up and are zero.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the differenced series the model was fitted on.
    pub fn diff_series(&self) -> &[f64] {
        &self.diff_series
    }

    /// Returns the in-sample one-step predictions on the differenced scale,
    /// one per residual in the diagnostic window.
    pub fn fitted_values(&self) -> Vec<f64> {
        let start = self.diff_series.len() - self.diagnostics.n;
        self.diff_series[start..]
            .iter()
            .zip(&self.residuals[start..])
            .map(|(x, r)| x - r)
            .collect()
    }

    /// Returns the number of residuals the diagnostics were computed from.
    pub fn n_fitted(&self) -> usize {
        self.diagnostics.n
    }

    /// Returns the mean squared residual.
    pub fn mse(&self) -> f64 {
        self.diagnostics.mse
    }

    /// Returns the root mean squared residual.
    pub fn rmse(&self) -> f64 {
        self.diagnostics.rmse
    }

    /// Returns the Akaike Information Criterion, `n·ln(mse) + 2k` with
    /// `k = p + q + 2`. Lower is better; `+Infinity` for an infeasible fit.
    pub fn aic(&self) -> f64 {
        self.diagnostics.aic
    }

    /// Returns the Bayesian Information Criterion, `n·ln(mse) + k·ln(n)`.
    pub fn bic(&self) -> f64 {
        self.diagnostics.bic
    }

    /// Returns the score under `criterion`.
    pub fn score(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Aic => self.aic(),
            Criterion::Bic => self.bic(),
        }
    }

    /// Returns the criterion this model was selected by, if it came from
    /// [`auto_arima()`](crate::auto_arima).
    pub fn criterion(&self) -> Option<Criterion> {
        self.criterion
    }

    /// Returns up to five best-ranked candidates, best first.
    ///
    /// Empty unless this model came from [`auto_arima()`](crate::auto_arima).
    pub fn top_candidates(&self) -> &[CandidateSummary] {
        &self.top_candidates
    }

    /// Projects the model `steps` periods beyond `original_series`.
    ///
    /// See [`forecast()`](crate::forecast()).
    pub fn forecast(&self, original_series: &[f64], steps: usize) -> Vec<f64> {
        crate::forecast::forecast(self, original_series, steps)
    }
}

impl fmt::Display for ArimaFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, d, q) = self.order();
        write!(
            f,
            "ARIMA({p},{d},{q}) aic={:.4} bic={:.4} rmse={:.4}",
            self.aic(),
            self.bic(),
            self.rmse()
        )
    }
}

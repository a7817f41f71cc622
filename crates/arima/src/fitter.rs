//! Fitting pipeline: differencing, AR least squares, MA refinement, diagnostics.

use tracing::debug;

use crate::ar::{ArEstimate, estimate_ar};
use crate::diff::difference;
use crate::fit::{ArimaFit, Diagnostics};
use crate::ma::{MaEstimate, estimate_ma};
use crate::spec::ArimaSpec;

/// Fits an ARIMA(p,d,q) model to `series`.
///
/// The series is differenced `d` times, an AR(p) regression is fitted to
/// the differenced values, and `q` MA coefficients are estimated from its
/// residuals. Diagnostics cover the residuals from index `max(p, q)` on.
///
/// Never fails: if nothing remains after warm-up, every diagnostic is
/// `+Infinity` and all coefficients are zero.
///
/// # Example
///
/// ```
/// use fincast_arima::fit_arima;
///
/// let series: Vec<f64> = (0..30)
///     .map(|i| 10.0 + 5.0 * (i as f64 * 0.4).sin() + ((i * 37) % 11) as f64 * 0.3)
///     .collect();
/// let fit = fit_arima(&series, 2, 1, 1);
/// assert_eq!(fit.order(), (2, 1, 1));
/// assert_eq!(fit.diff_series().len(), 29);
/// assert!(fit.aic().is_finite());
///
/// let degenerate = fit_arima(&[1.0, 2.0], 5, 0, 5);
/// assert_eq!(degenerate.aic(), f64::INFINITY);
/// ```
pub fn fit_arima(series: &[f64], p: usize, d: usize, q: usize) -> ArimaFit {
    fit_differenced(ArimaSpec::new(p, d, q), difference(series, d))
}

/// Fits the ARMA part of `spec` to an already differenced series.
pub(crate) fn fit_differenced(spec: ArimaSpec, diff_series: Vec<f64>) -> ArimaFit {
    let (p, q) = (spec.p(), spec.q());
    let start = p.max(q);

    if diff_series.len() <= start {
        debug!(
            order = ?spec.order(),
            n = diff_series.len(),
            "no observations past warm-up"
        );
        return infeasible(spec, diff_series);
    }

    let ar = estimate_ar(&diff_series, p);
    let ma = estimate_ma(&diff_series, p, &ar.coefficients, ar.intercept, q);
    let diagnostics = Diagnostics::from_window(&ma.residuals[start..], spec.n_params());

    debug!(
        order = ?spec.order(),
        n = diagnostics.n,
        aic = diagnostics.aic,
        bic = diagnostics.bic,
        rmse = diagnostics.rmse,
        "fitted"
    );

    ArimaFit::new(spec, ar, ma, diff_series, diagnostics)
}

fn infeasible(spec: ArimaSpec, diff_series: Vec<f64>) -> ArimaFit {
    let ar = ArEstimate {
        intercept: 0.0,
        coefficients: vec![0.0; spec.p()],
    };
    let ma = MaEstimate {
        coefficients: vec![0.0; spec.q()],
        residuals: vec![0.0; diff_series.len()],
    };
    ArimaFit::new(spec, ar, ma, diff_series, Diagnostics::infeasible())
}

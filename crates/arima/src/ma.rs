//! Moving-average coefficient estimation by iterated residual regression.
//!
//! Starting from the residuals of the AR fit, each round regresses the
//! residuals on their own lags, clamps the result into the invertible
//! range, and recomputes the residuals with the new coefficients. The
//! number of rounds is fixed, so the runtime and output are deterministic.

use serde::Serialize;

use crate::linalg::NormalEquations;

/// Ridge term added to the diagonal of the MA normal equations.
pub const MA_RIDGE: f64 = 1e-6;

/// MA coefficients are clamped into `[-MA_BOUND, MA_BOUND]`.
pub const MA_BOUND: f64 = 0.95;

/// Number of regress-and-recompute rounds.
pub const MA_ITERATIONS: usize = 3;

/// MA coefficients and the residuals they produce.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaEstimate {
    /// MA coefficients, lag 1 first. Always `q` long, each in `[-MA_BOUND, MA_BOUND]`.
    pub coefficients: Vec<f64>,
    /// Residuals of the combined AR+MA fit, one per observation.
    pub residuals: Vec<f64>,
}

/// Estimates `q` MA coefficients on top of a fitted AR part.
///
/// With `q = 0` the coefficients are empty and the residuals come from the
/// AR fit alone. Otherwise the coefficients start at zero and go through
/// [`MA_ITERATIONS`] rounds of:
///
/// 1. regress `r[i]` on `[r[i-1], …, r[i-q]]` for `i` in `q..len`,
/// 2. solve with [`MA_RIDGE`] on the diagonal,
/// 3. clamp each coefficient to `[-MA_BOUND, MA_BOUND]`,
/// 4. recompute the residuals.
pub fn estimate_ma(
    series: &[f64],
    p: usize,
    ar: &[f64],
    intercept: f64,
    q: usize,
) -> MaEstimate {
    if q == 0 {
        return MaEstimate {
            coefficients: Vec::new(),
            residuals: compute_residuals(series, p, ar, intercept, &[], 0),
        };
    }

    let mut coefficients = vec![0.0; q];
    let mut residuals = compute_residuals(series, p, ar, intercept, &coefficients, q);
    let mut row = vec![0.0; q];

    for _ in 0..MA_ITERATIONS {
        let mut normal = NormalEquations::new(q);
        for i in q..residuals.len() {
            for j in 0..q {
                row[j] = residuals[i - 1 - j];
            }
            normal.add_row(&row, residuals[i]);
        }

        coefficients = normal.solve(MA_RIDGE).iter().map(|&c| clamp_ma(c)).collect();
        residuals = compute_residuals(series, p, ar, intercept, &coefficients, q);
    }

    MaEstimate {
        coefficients,
        residuals,
    }
}

/// One-step-ahead residuals of an ARMA recursion.
///
/// For every `i >= max(p, q)` the prediction is
/// `intercept + Σ ar[j]·series[i-1-j] + Σ ma[j]·residual[i-1-j]`, using the
/// residuals already computed earlier in the same pass. Entries before
/// `max(p, q)` are warm-up and stay at zero.
pub fn compute_residuals(
    series: &[f64],
    p: usize,
    ar: &[f64],
    intercept: f64,
    ma: &[f64],
    q: usize,
) -> Vec<f64> {
    let n = series.len();
    let mut residuals = vec![0.0; n];

    for i in p.max(q)..n {
        let mut predicted = intercept;
        for (j, &phi) in ar.iter().take(p).enumerate() {
            predicted += phi * series[i - 1 - j];
        }
        for (j, &theta) in ma.iter().take(q).enumerate() {
            predicted += theta * residuals[i - 1 - j];
        }
        residuals[i] = series[i] - predicted;
    }

    residuals
}

/// Clamps into the invertible range; a non-finite solution collapses to zero.
fn clamp_ma(coefficient: f64) -> f64 {
    if coefficient.is_finite() {
        coefficient.clamp(-MA_BOUND, MA_BOUND)
    } else {
        0.0
    }
}

//! Autoregressive coefficient estimation by ridge-stabilised OLS.

use serde::Serialize;

use crate::linalg::NormalEquations;

/// Ridge term added to the diagonal of the AR normal equations.
pub const AR_RIDGE: f64 = 1e-8;

/// Intercept and lag coefficients of an AR(p) regression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArEstimate {
    /// Constant term.
    pub intercept: f64,
    /// Lag coefficients, lag 1 first. Always `p` long.
    pub coefficients: Vec<f64>,
}

impl ArEstimate {
    fn zeros(p: usize) -> Self {
        Self {
            intercept: 0.0,
            coefficients: vec![0.0; p],
        }
    }
}

/// Fits `x[i] = c + φ₁·x[i-1] + … + φₚ·x[i-p]` by ordinary least squares.
///
/// One design row `[1, x[i-1], …, x[i-p]]` is formed for every `i` in
/// `p..series.len()`. The normal equations get [`AR_RIDGE`] on the diagonal
/// before they are solved.
///
/// If `series.len() <= p` there is nothing to regress on and a zero
/// intercept with `p` zero coefficients is returned.
pub fn estimate_ar(series: &[f64], p: usize) -> ArEstimate {
    if series.len() <= p {
        return ArEstimate::zeros(p);
    }

    let mut normal = NormalEquations::new(p + 1);
    let mut row = vec![0.0; p + 1];
    row[0] = 1.0;
    for i in p..series.len() {
        for j in 0..p {
            row[j + 1] = series[i - 1 - j];
        }
        normal.add_row(&row, series[i]);
    }

    let beta = normal.solve(AR_RIDGE);
    ArEstimate {
        intercept: beta[0],
        coefficients: beta.iter().skip(1).copied().collect(),
    }
}

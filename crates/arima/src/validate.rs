//! Input checks for callers that want to reject bad series up front.

use crate::error::ArimaError;

/// Checks that `series` is non-empty and entirely finite.
///
/// Fitting never calls this: degenerate input still yields a model with
/// infinite diagnostics. Use it at the boundary where a bad series should
/// be reported instead of silently forecast.
///
/// # Errors
///
/// [`ArimaError::EmptyData`] for an empty slice, [`ArimaError::NonFiniteData`]
/// if any value is NaN or infinite.
pub fn validate_series(series: &[f64]) -> Result<(), ArimaError> {
    if series.is_empty() {
        return Err(ArimaError::EmptyData);
    }
    if series.iter().any(|v| !v.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }
    Ok(())
}

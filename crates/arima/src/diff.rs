//! Differencing and its inverse.

/// Applies first differencing (`x[i] - x[i-1]`) exactly `d` times.
///
/// Each pass shortens the series by one element, so the result has
/// `series.len().saturating_sub(d)` elements. `d = 0` returns the series
/// unchanged.
///
/// # Example
///
/// ```
/// use fincast_arima::difference;
///
/// assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 1), vec![3.0, 5.0, 7.0]);
/// assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 2), vec![2.0, 2.0]);
/// ```
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.is_empty() {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Reverses `d` passes of differencing on a block of forecasts.
///
/// `original_tail` holds the last values of the series before the
/// forecasts begin, oldest first (the last `d` values suffice). Each pass
/// is a cumulative sum that starts from one anchor: the pass restoring
/// level `l` starts from the last value of `difference(original_tail, l)`,
/// which for `l = 0` is the last observed value itself. A missing anchor
/// counts as zero.
///
/// The output always has the same length as `diff_forecasts`.
///
/// # Example
///
/// ```
/// use fincast_arima::undifference;
///
/// // last observed value 10.0, forecast increments of +1 and +2
/// assert_eq!(undifference(&[1.0, 2.0], &[10.0], 1), vec![11.0, 13.0]);
/// ```
pub fn undifference(diff_forecasts: &[f64], original_tail: &[f64], d: usize) -> Vec<f64> {
    let mut result = diff_forecasts.to_vec();
    for level in (0..d).rev() {
        let anchor = difference(original_tail, level)
            .last()
            .copied()
            .unwrap_or(0.0);
        let mut acc = anchor;
        for value in result.iter_mut() {
            acc += *value;
            *value = acc;
        }
    }
    result
}

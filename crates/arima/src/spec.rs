//! ARIMA model specification (unfitted).

use serde::Serialize;

use crate::fit::ArimaFit;

/// An unfitted ARIMA(p,d,q) model specification.
///
/// This is the entry point of the typestate workflow. Create a spec with
/// [`ArimaSpec::new()`], then call [`ArimaSpec::fit()`] to obtain an [`ArimaFit`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["ArimaSpec::new(p, d, q)"] -->|".fit(&series)"| B["ArimaFit"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ArimaSpec {
    p: usize,
    d: usize,
    q: usize,
}

impl ArimaSpec {
    /// Creates a new ARIMA(p,d,q) specification with AR order `p`,
    /// differencing order `d` and MA order `q`.
    ///
    /// # Example
    ///
    /// ```
    /// use fincast_arima::ArimaSpec;
    ///
    /// let spec = ArimaSpec::new(2, 1, 1);
    /// assert_eq!(spec.p(), 2);
    /// assert_eq!(spec.d(), 1);
    /// assert_eq!(spec.q(), 1);
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Number of estimated parameters: AR and MA coefficients, the
    /// intercept, and the innovation variance.
    pub fn n_params(&self) -> usize {
        self.p + self.q + 2
    }

    /// Fits this specification to `series`.
    ///
    /// Differencing, AR least squares, and iterated MA regression run in
    /// sequence. This never fails: when the series is too short for the
    /// requested orders the returned model has zero coefficients and
    /// infinite diagnostics.
    pub fn fit(&self, series: &[f64]) -> ArimaFit {
        crate::fitter::fit_arima(series, self.p, self.d, self.q)
    }
}

//! Error types for the fincast-arima crate.

/// Error type for the fallible edges of the fincast-arima crate.
///
/// Fitting itself never fails: degenerate input produces a model with
/// infinite diagnostics. These variants cover input validation, option
/// parsing, and candidates rejected during order selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArimaError {
    /// Returned when the input series is empty.
    #[error("input series is empty")]
    EmptyData,

    /// Returned when the input series contains non-finite values (NaN or infinity).
    #[error("input series contains non-finite values")]
    NonFiniteData,

    /// Returned when a selection criterion name is not recognised.
    #[error("unknown selection criterion {0:?} (expected \"aic\" or \"bic\")")]
    UnknownCriterion(String),

    /// Returned when forecast clamp bounds are non-finite or inverted.
    #[error("invalid forecast bounds: min={min}, max={max}")]
    InvalidBounds {
        /// Lower clamp bound.
        min: f64,
        /// Upper clamp bound.
        max: f64,
    },

    /// Returned when a candidate model produces a non-finite score.
    #[error("ARIMA({p},{d},{q}) produced a non-finite score")]
    NonFiniteScore {
        /// AR order of the rejected candidate.
        p: usize,
        /// Differencing order of the rejected candidate.
        d: usize,
        /// MA order of the rejected candidate.
        q: usize,
    },
}

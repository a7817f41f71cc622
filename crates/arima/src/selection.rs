//! Information-criterion based ARIMA order selection.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::criterion::Criterion;
use crate::diff::difference;
use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::fitter::{fit_arima, fit_differenced};
use crate::spec::ArimaSpec;

/// A differencing level is skipped when fewer points than this remain.
pub const MIN_DIFF_LEN: usize = 10;

/// Number of ranked candidates attached to the selected model.
pub const TOP_CANDIDATES: usize = 5;

/// Order fitted when no candidate produces a finite score.
pub const FALLBACK_ORDER: (usize, usize, usize) = (1, 1, 0);

/// Search bounds and ranking criterion for [`auto_arima()`].
///
/// # Example
///
/// ```
/// use fincast_arima::{AutoArimaConfig, Criterion};
///
/// let config = AutoArimaConfig::new()
///     .with_max_orders(3, 1, 2)
///     .with_criterion(Criterion::Bic);
///
/// assert_eq!(config.max_p(), 3);
/// assert_eq!(config.criterion(), Criterion::Bic);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AutoArimaConfig {
    max_p: usize,
    max_d: usize,
    max_q: usize,
    criterion: Criterion,
}

impl AutoArimaConfig {
    /// Creates a configuration with the default search bounds.
    ///
    /// Defaults: `max_p = 4`, `max_d = 2`, `max_q = 3`, `criterion = Aic`.
    pub fn new() -> Self {
        Self {
            max_p: 4,
            max_d: 2,
            max_q: 3,
            criterion: Criterion::Aic,
        }
    }

    /// Sets the inclusive upper bounds of the `(p, d, q)` grid.
    pub fn with_max_orders(mut self, max_p: usize, max_d: usize, max_q: usize) -> Self {
        self.max_p = max_p;
        self.max_d = max_d;
        self.max_q = max_q;
        self
    }

    /// Sets the ranking criterion.
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Returns the maximum AR order.
    pub fn max_p(&self) -> usize {
        self.max_p
    }

    /// Returns the maximum differencing order.
    pub fn max_d(&self) -> usize {
        self.max_d
    }

    /// Returns the maximum MA order.
    pub fn max_q(&self) -> usize {
        self.max_q
    }

    /// Returns the ranking criterion.
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }
}

impl Default for AutoArimaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores of one candidate evaluated during order selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CandidateSummary {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
    /// Akaike Information Criterion.
    pub aic: f64,
    /// Bayesian Information Criterion.
    pub bic: f64,
    /// Root mean squared residual.
    pub rmse: f64,
}

impl CandidateSummary {
    fn from_fit(fit: &ArimaFit) -> Self {
        let (p, d, q) = fit.order();
        Self {
            p,
            d,
            q,
            aic: fit.aic(),
            bic: fit.bic(),
            rmse: fit.rmse(),
        }
    }

    /// Returns `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Returns the score under `criterion`.
    pub fn score(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Aic => self.aic,
            Criterion::Bic => self.bic,
        }
    }
}

/// Selects an ARIMA(p,d,q) model by grid search over
/// `0..=max_p × 0..=max_d × 0..=max_q`, ranked by AIC or BIC.
///
/// Per differencing level `d` the series is differenced once; levels with
/// fewer than [`MIN_DIFF_LEN`] points are skipped. Within a level the
/// no-op model ARIMA(0,0,0) and any `(p, q)` with
/// `diff_len <= p + q + 2` are skipped. Candidates whose score is not
/// finite are dropped and the search carries on.
///
/// Candidates are evaluated in parallel but ranked in grid order
/// (`d`, then `p`, then `q`, ascending), so ties go to the first
/// candidate encountered. The returned model carries the criterion and
/// the [`TOP_CANDIDATES`] best summaries, best first.
///
/// If no candidate has a finite score, ARIMA[`FALLBACK_ORDER`] is fitted
/// and returned instead, so a model is always produced.
///
/// # Example
///
/// ```
/// use fincast_arima::{AutoArimaConfig, auto_arima};
///
/// let series: Vec<f64> = (0..40)
///     .map(|i| 5.0 + 3.0 * (i as f64 * 0.5).sin() + ((i * 17) % 7) as f64 * 0.2)
///     .collect();
/// let best = auto_arima(&series, &AutoArimaConfig::default());
///
/// assert!(best.top_candidates().len() <= 5);
/// assert_eq!(best.top_candidates()[0].order(), best.order());
/// ```
#[tracing::instrument(
    skip(series, config),
    fields(n = series.len(), criterion = %config.criterion())
)]
pub fn auto_arima(series: &[f64], config: &AutoArimaConfig) -> ArimaFit {
    let criterion = config.criterion();

    let levels: Vec<(usize, Vec<f64>)> = (0..=config.max_d())
        .map(|d| (d, difference(series, d)))
        .filter(|(d, diff)| {
            let keep = diff.len() >= MIN_DIFF_LEN;
            if !keep {
                debug!(d, n = diff.len(), "differencing level skipped: too few points");
            }
            keep
        })
        .collect();

    let grid: Vec<(ArimaSpec, &[f64])> = levels
        .iter()
        .flat_map(|(d, diff)| {
            (0..=config.max_p()).flat_map(move |p| {
                (0..=config.max_q()).map(move |q| (ArimaSpec::new(p, *d, q), diff.as_slice()))
            })
        })
        .filter(|(spec, diff)| {
            let trivial = spec.order() == (0, 0, 0);
            !trivial && diff.len() > spec.n_params()
        })
        .collect();

    // `collect` on an indexed parallel iterator keeps grid order.
    let results: Vec<Result<ArimaFit, ArimaError>> = grid
        .par_iter()
        .map(|(spec, diff)| evaluate_candidate(*spec, diff, criterion))
        .collect();

    let (best, candidates, n_scored) = rank_candidates(results, criterion);

    match best {
        Some(fit) => {
            info!(
                order = ?fit.order(),
                score = fit.score(criterion),
                n_scored,
                "selected model"
            );
            fit.with_selection(criterion, candidates)
        }
        None => {
            let (p, d, q) = FALLBACK_ORDER;
            warn!(
                n_tried = grid.len(),
                "no candidate produced a finite score; falling back to ARIMA({p},{d},{q})"
            );
            fit_arima(series, p, d, q).with_selection(criterion, Vec::new())
        }
    }
}

/// Picks the best fit under strict `<` and ranks the scored candidates.
///
/// `results` must be in grid order: the first of several equally scored
/// fits wins, and the stable sort keeps that order among ties. Returns the
/// best fit, the top [`TOP_CANDIDATES`] summaries and the number of fits
/// that scored.
fn rank_candidates(
    results: Vec<Result<ArimaFit, ArimaError>>,
    criterion: Criterion,
) -> (Option<ArimaFit>, Vec<CandidateSummary>, usize) {
    let mut best: Option<ArimaFit> = None;
    let mut candidates = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(fit) => {
                candidates.push(CandidateSummary::from_fit(&fit));
                let improves = best
                    .as_ref()
                    .is_none_or(|b| fit.score(criterion) < b.score(criterion));
                if improves {
                    best = Some(fit);
                }
            }
            Err(err) => debug!(%err, "candidate skipped"),
        }
    }

    candidates.sort_by(|a, b| a.score(criterion).total_cmp(&b.score(criterion)));
    let n_scored = candidates.len();
    candidates.truncate(TOP_CANDIDATES);
    (best, candidates, n_scored)
}

/// Fits one grid candidate, rejecting it if its score is not finite.
fn evaluate_candidate(
    spec: ArimaSpec,
    diff_series: &[f64],
    criterion: Criterion,
) -> Result<ArimaFit, ArimaError> {
    let fit = fit_differenced(spec, diff_series.to_vec());
    if fit.score(criterion).is_finite() {
        Ok(fit)
    } else {
        let (p, d, q) = spec.order();
        Err(ArimaError::NonFiniteScore { p, d, q })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ar::ArEstimate;
    use crate::fit::Diagnostics;
    use crate::ma::MaEstimate;

    fn series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let jitter = ((i * i * 5 + 1) % 13) as f64 / 13.0;
                6.0 + 3.0 * (i as f64 * 0.45).sin() + jitter
            })
            .collect()
    }

    #[test]
    fn config_defaults() {
        let cfg = AutoArimaConfig::default();
        assert_eq!(cfg.max_p(), 4);
        assert_eq!(cfg.max_d(), 2);
        assert_eq!(cfg.max_q(), 3);
        assert_eq!(cfg.criterion(), Criterion::Aic);
    }

    #[test]
    fn config_builder_chaining() {
        let cfg = AutoArimaConfig::new()
            .with_max_orders(1, 0, 2)
            .with_criterion(Criterion::Bic);
        assert_eq!((cfg.max_p(), cfg.max_d(), cfg.max_q()), (1, 0, 2));
        assert_eq!(cfg.criterion(), Criterion::Bic);
    }

    #[test]
    fn candidates_sorted_and_truncated() {
        let fit = auto_arima(&series(40), &AutoArimaConfig::default());
        let top = fit.top_candidates();
        assert!(!top.is_empty() && top.len() <= TOP_CANDIDATES);
        assert!(top.windows(2).all(|w| w[0].aic <= w[1].aic));
        assert_eq!(top[0].order(), fit.order());
        assert_eq!(fit.criterion(), Some(Criterion::Aic));
    }

    #[test]
    fn bic_ranks_by_bic() {
        let cfg = AutoArimaConfig::new().with_criterion(Criterion::Bic);
        let fit = auto_arima(&series(40), &cfg);
        let top = fit.top_candidates();
        assert!(top.windows(2).all(|w| w[0].bic <= w[1].bic));
        assert_eq!(fit.criterion(), Some(Criterion::Bic));
        assert_eq!(top[0].bic, fit.bic());
    }

    #[test]
    fn selected_order_within_grid() {
        let cfg = AutoArimaConfig::new().with_max_orders(2, 1, 1);
        let (p, d, q) = auto_arima(&series(30), &cfg).order();
        assert!(p <= 2 && d <= 1 && q <= 1);
        assert_ne!((p, d, q), (0, 0, 0));
    }

    #[test]
    fn short_series_falls_back() {
        // 9 points: every differencing level is below MIN_DIFF_LEN.
        let data = series(9);
        let fit = auto_arima(&data, &AutoArimaConfig::default());
        assert_eq!(fit.order(), FALLBACK_ORDER);
        assert!(fit.top_candidates().is_empty());
        assert_eq!(fit.criterion(), Some(Criterion::Aic));
    }

    fn scored_fit(p: usize, d: usize, q: usize, aic: f64) -> ArimaFit {
        let diagnostics = Diagnostics {
            n: 10,
            mse: 1.0,
            rmse: 1.0,
            aic,
            bic: aic,
        };
        ArimaFit::new(
            ArimaSpec::new(p, d, q),
            ArEstimate {
                intercept: 0.0,
                coefficients: vec![0.0; p],
            },
            MaEstimate {
                coefficients: vec![0.0; q],
                residuals: vec![0.0; 10],
            },
            vec![0.0; 10],
            diagnostics,
        )
    }

    #[test]
    fn ties_go_to_first_in_grid_order() {
        let results = vec![
            Ok(scored_fit(0, 0, 1, 5.0)),
            Ok(scored_fit(1, 0, 0, 3.0)),
            Err(ArimaError::NonFiniteScore { p: 1, d: 0, q: 1 }),
            Ok(scored_fit(2, 0, 0, 3.0)),
            Ok(scored_fit(0, 1, 1, 3.0)),
        ];
        let (best, top, n_scored) = rank_candidates(results, Criterion::Aic);
        assert_eq!(best.unwrap().order(), (1, 0, 0));
        assert_eq!(n_scored, 4);
        let orders: Vec<_> = top.iter().map(CandidateSummary::order).collect();
        assert_eq!(orders, vec![(1, 0, 0), (2, 0, 0), (0, 1, 1), (0, 0, 1)]);
    }

    #[test]
    fn later_strictly_better_fit_replaces_best() {
        let results = vec![Ok(scored_fit(1, 0, 0, 3.0)), Ok(scored_fit(0, 0, 2, 2.5))];
        let (best, top, _) = rank_candidates(results, Criterion::Aic);
        assert_eq!(best.unwrap().order(), (0, 0, 2));
        assert_eq!(top[0].order(), (0, 0, 2));
    }

    #[test]
    fn top_candidates_truncated() {
        let results = (0..8)
            .map(|i| Ok(scored_fit(1, 0, i % 3, 10.0 - i as f64)))
            .collect();
        let (_, top, n_scored) = rank_candidates(results, Criterion::Aic);
        assert_eq!(n_scored, 8);
        assert_eq!(top.len(), TOP_CANDIDATES);
        assert_eq!(top[0].aic, 3.0);
    }

    #[test]
    fn no_scored_fit_yields_none() {
        let results = vec![Err(ArimaError::NonFiniteScore { p: 1, d: 0, q: 0 })];
        let (best, top, n_scored) = rank_candidates(results, Criterion::Aic);
        assert!(best.is_none());
        assert!(top.is_empty());
        assert_eq!(n_scored, 0);
    }

    #[test]
    fn search_is_deterministic() {
        let data = series(45);
        let a = auto_arima(&data, &AutoArimaConfig::default());
        let b = auto_arima(&data, &AutoArimaConfig::default());
        assert_eq!(a.order(), b.order());
        assert_eq!(a.top_candidates(), b.top_candidates());
    }

    #[test]
    fn non_finite_candidate_is_rejected() {
        // All-zero differences give zero residuals and ln(0) = -inf.
        let err = evaluate_candidate(ArimaSpec::new(1, 1, 0), &[0.0; 12], Criterion::Aic)
            .unwrap_err();
        assert_eq!(err, ArimaError::NonFiniteScore { p: 1, d: 1, q: 0 });
    }
}

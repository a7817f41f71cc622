//! End-to-end selection and forecasting tests for fincast-arima.

use fincast_arima::{
    AutoArimaConfig, Criterion, FALLBACK_ORDER, ForecastOptions, INFLATION_BOUNDS, arima_forecast,
    auto_arima, fit_arima,
};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Synthetic 60-year annual inflation path (percent), volatile with a
/// couple of high-inflation episodes.
const INFLATION: [f64; 60] = [
    2.58, -2.81, 0.60, 3.42, 5.87, 2.14, -0.95, 8.77, 14.63, 6.45, //
    9.21, 15.84, 12.06, 16.42, 4.51, 6.12, 5.78, -1.32, 8.44, 19.07, //
    -9.76, -2.43, 7.12, 9.58, 5.21, 20.74, 10.53, 3.49, 7.63, 12.85, //
    -5.11, -3.74, 4.01, 6.33, 5.28, -8.15, 1.79, 15.16, 8.61, 6.83, //
    10.37, 15.12, 8.64, 25.31, 36.42, 2.71, 8.12, 33.29, 24.07, 8.08, //
    7.41, 10.14, 7.26, 10.69, 13.86, 15.81, 20.35, 26.84, 30.22, 23.10,
];

fn generate_ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    for t in 1..n {
        data[t] = phi * data[t - 1] + normal.sample(&mut rng);
    }
    data
}

fn noisy_series(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 3.0).unwrap();
    let mut level = 8.0;
    (0..n)
        .map(|_| {
            level = 0.6 * level + 3.0 + normal.sample(&mut rng);
            level
        })
        .collect()
}

#[test]
fn inflation_end_to_end() {
    let options = ForecastOptions::new().with_criterion(Criterion::Aic);
    let result = arima_forecast(&INFLATION, 25, &options);

    assert_eq!(result.predictions.len(), 25);
    let (lo, hi) = INFLATION_BOUNDS;
    assert!(result.predictions.iter().all(|v| (lo..=hi).contains(v)));

    let (p, d, q) = result.model.order();
    assert!(p <= 4 && d <= 2 && q <= 3, "order ({p},{d},{q}) outside grid");
    assert_eq!(result.model.criterion(), Some(Criterion::Aic));

    let top = result.model.top_candidates();
    assert!(!top.is_empty() && top.len() <= 5);
    assert!(top.windows(2).all(|w| w[0].aic <= w[1].aic));
    assert_eq!(top[0].order(), (p, d, q));
    assert!(result.model.aic().is_finite());
}

#[test]
fn inflation_end_to_end_bic() {
    let options = ForecastOptions::new().with_criterion(Criterion::Bic);
    let result = arima_forecast(&INFLATION, 10, &options);
    let top = result.model.top_candidates();
    assert!(top.windows(2).all(|w| w[0].bic <= w[1].bic));
    assert_eq!(result.model.criterion(), Some(Criterion::Bic));
}

#[test]
fn auto_arima_returns_finite_or_fallback() {
    for seed in 0..8 {
        for n in [15, 20, 32, 50] {
            let series = noisy_series(n, seed);
            let fit = auto_arima(&series, &AutoArimaConfig::default());
            let finite = fit.aic().is_finite() && fit.bic().is_finite();
            assert!(
                finite || fit.order() == FALLBACK_ORDER,
                "seed {seed} n {n}: {fit}"
            );
        }
    }
}

#[test]
fn selected_model_has_lowest_score_in_grid() {
    let series = generate_ar1(0.7, 200, 42);
    let config = AutoArimaConfig::new().with_max_orders(2, 1, 2);
    let best = auto_arima(&series, &config);

    for d in 0..=1 {
        for p in 0..=2 {
            for q in 0..=2 {
                if (p, d, q) == (0, 0, 0) {
                    continue;
                }
                let aic = fit_arima(&series, p, d, q).aic();
                if aic.is_finite() {
                    assert!(
                        best.aic() <= aic,
                        "({p},{d},{q}) aic {aic} beats selected {}",
                        best
                    );
                }
            }
        }
    }
}

#[test]
fn ar1_data_prefers_ar_term_over_ma_term() {
    let series = generate_ar1(0.7, 300, 7);
    let ar1 = fit_arima(&series, 1, 0, 0);
    let ma1 = fit_arima(&series, 0, 0, 1);
    assert!(ar1.aic() < ma1.aic(), "ar1 {} vs ma1 {}", ar1.aic(), ma1.aic());
    assert!((ar1.ar()[0] - 0.7).abs() < 0.15);
}

#[test]
fn forecast_length_matches_steps() {
    for steps in [0, 1, 2, 7, 25, 60] {
        let result = arima_forecast(&INFLATION, steps, &ForecastOptions::default());
        assert_eq!(result.predictions.len(), steps);
    }
}

#[test]
fn fixed_order_forecasts_stay_in_bounds() {
    let orders = [(0, 1, 0), (1, 1, 0), (2, 1, 1), (3, 2, 1), (4, 0, 3)];
    for (p, d, q) in orders {
        let options = ForecastOptions::new().with_auto(false).with_order(p, d, q);
        let result = arima_forecast(&INFLATION, 40, &options);
        assert_eq!(result.model.order(), (p, d, q));
        assert!(
            result
                .predictions
                .iter()
                .all(|v| (-20.0..=100.0).contains(v)),
            "ARIMA({p},{d},{q}) escaped bounds"
        );
    }
}

#[test]
fn short_series_forecast_still_has_steps() {
    let result = arima_forecast(&[4.2, 5.1, 3.9], 5, &ForecastOptions::default());
    assert_eq!(result.predictions.len(), 5);
    assert_eq!(result.model.order(), FALLBACK_ORDER);
}

#[test]
fn serialized_forecast_contains_model_summary() {
    let result = arima_forecast(&INFLATION, 3, &ForecastOptions::default());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["predictions"].as_array().unwrap().len(), 3);
    assert!(json["model"]["aic"].is_number());
    assert_eq!(json["model"]["criterion"], "aic");
    assert!(json["model"]["top_candidates"].as_array().unwrap().len() <= 5);
}

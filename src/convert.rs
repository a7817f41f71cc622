//! Pure conversion functions: TOML config structs and CLI overrides -> crate API types.

use anyhow::{Context, Result, bail};

use fincast_arima::{AutoArimaConfig, Criterion, ForecastOptions};

use crate::config::*;

/// Parses a selection criterion name (`aic` or `bic`, any case).
pub fn parse_criterion(s: &str) -> Result<Criterion> {
    Ok(s.parse::<Criterion>()?)
}

/// Parses a fixed model order written as `P,D,Q`.
pub fn parse_order(s: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [p, d, q] = parts.as_slice() else {
        bail!("order must be three comma-separated integers P,D,Q, got {s:?}");
    };
    let parse = |name: &str, v: &str| {
        v.parse::<usize>()
            .with_context(|| format!("invalid {name} in order {s:?}"))
    };
    Ok((parse("p", *p)?, parse("d", *d)?, parse("q", *q)?))
}

/// Builds an [`AutoArimaConfig`] from the TOML search section.
pub fn build_auto_config(search: &SearchToml, criterion: Criterion) -> AutoArimaConfig {
    AutoArimaConfig::new()
        .with_max_orders(search.max_p, search.max_d, search.max_q)
        .with_criterion(criterion)
}

/// Resolves the selection criterion, preferring the CLI override.
pub fn resolve_criterion(config: &FincastConfig, cli: Option<&str>) -> Result<Criterion> {
    parse_criterion(cli.unwrap_or(&config.forecast.criterion))
}

/// Builds [`ForecastOptions`] from the config plus CLI overrides.
///
/// A `fixed` order turns automatic selection off. Bounds are validated.
pub fn build_forecast_options(
    config: &FincastConfig,
    fixed: Option<&str>,
    criterion: Option<&str>,
) -> Result<ForecastOptions> {
    let fc = &config.forecast;
    let criterion = resolve_criterion(config, criterion)?;

    let (auto, (p, d, q)) = match fixed {
        Some(s) => (false, parse_order(s)?),
        None => (fc.auto, (fc.order[0], fc.order[1], fc.order[2])),
    };

    let search = &config.search;
    let options = ForecastOptions::new()
        .with_auto(auto)
        .with_order(p, d, q)
        .with_criterion(criterion)
        .with_max_orders(search.max_p, search.max_d, search.max_q)
        .with_bounds(fc.clamp_min, fc.clamp_max);
    options.validate().context("invalid [forecast] clamp bounds")?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_criterion_variants() {
        assert_eq!(parse_criterion("aic").unwrap(), Criterion::Aic);
        assert_eq!(parse_criterion("BIC").unwrap(), Criterion::Bic);
        let err = parse_criterion("hqic").unwrap_err();
        assert!(err.to_string().contains("hqic"));
    }

    #[test]
    fn parse_order_valid() {
        assert_eq!(parse_order("2,1,1").unwrap(), (2, 1, 1));
        assert_eq!(parse_order(" 0 , 2 , 3 ").unwrap(), (0, 2, 3));
    }

    #[test]
    fn parse_order_wrong_arity() {
        assert!(parse_order("1,1").is_err());
        assert!(parse_order("1,1,1,1").is_err());
    }

    #[test]
    fn parse_order_non_integer() {
        let err = parse_order("1,x,0").unwrap_err();
        assert!(format!("{err:#}").contains("invalid d"));
        assert!(parse_order("-1,0,0").is_err());
    }

    #[test]
    fn defaults_give_auto_aic() {
        let opts = build_forecast_options(&FincastConfig::default(), None, None).unwrap();
        assert!(opts.auto());
        assert_eq!(opts.search().criterion(), Criterion::Aic);
        let (min, max) = opts.bounds();
        assert_relative_eq!(min, -20.0);
        assert_relative_eq!(max, 100.0);
    }

    #[test]
    fn custom_clamp_bounds_flow_through() {
        let mut cfg = FincastConfig::default();
        cfg.forecast.clamp_min = -5.5;
        cfg.forecast.clamp_max = 42.25;
        let (min, max) = build_forecast_options(&cfg, None, None).unwrap().bounds();
        assert_relative_eq!(min, -5.5);
        assert_relative_eq!(max, 42.25);
    }

    #[test]
    fn fixed_override_disables_auto() {
        let opts =
            build_forecast_options(&FincastConfig::default(), Some("1,1,0"), Some("bic")).unwrap();
        assert!(!opts.auto());
        assert_eq!(opts.order(), (1, 1, 0));
        assert_eq!(opts.search().criterion(), Criterion::Bic);
    }

    #[test]
    fn search_bounds_flow_through() {
        let mut cfg = FincastConfig::default();
        cfg.search.max_p = 1;
        cfg.search.max_q = 0;
        let opts = build_forecast_options(&cfg, None, None).unwrap();
        assert_eq!(opts.search().max_p(), 1);
        assert_eq!(opts.search().max_q(), 0);

        let auto = build_auto_config(&cfg.search, Criterion::Bic);
        assert_eq!(auto.max_d(), 2);
        assert_eq!(auto.criterion(), Criterion::Bic);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut cfg = FincastConfig::default();
        cfg.forecast.clamp_min = 50.0;
        cfg.forecast.clamp_max = 10.0;
        let err = build_forecast_options(&cfg, None, None).unwrap_err();
        assert!(format!("{err:#}").contains("min=50"));
    }

    #[test]
    fn cli_criterion_overrides_config() {
        let mut cfg = FincastConfig::default();
        cfg.forecast.criterion = "bic".to_string();
        assert_eq!(resolve_criterion(&cfg, None).unwrap(), Criterion::Bic);
        assert_eq!(resolve_criterion(&cfg, Some("aic")).unwrap(), Criterion::Aic);
    }
}

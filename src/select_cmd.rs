//! Select command: run the order search and print the ranked candidates.

use anyhow::Result;
use tracing::info_span;

use fincast_arima::{ArimaFit, auto_arima};

use crate::cli::SelectArgs;
use crate::config::FincastConfig;
use crate::convert;
use crate::forecast_cmd::load_checked;

/// Run the order search.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();

    let config = FincastConfig::load_or_default(args.config.as_deref())?;
    let criterion = convert::resolve_criterion(&config, args.criterion.as_deref())?;
    let auto_config = convert::build_auto_config(&config.search, criterion);

    let series = load_checked(&args.input, &args.column)?;
    let best = auto_arima(&series.values, &auto_config);

    print!("{}", render_table(&best));
    Ok(())
}

fn render_table(best: &ArimaFit) -> String {
    let mut out = format!("selected: {best}\n");
    let candidates = best.top_candidates();
    if candidates.is_empty() {
        out.push_str("no candidate scored finitely; fallback model used\n");
        return out;
    }

    out.push_str(&format!(
        "{:>4}  {:<12} {:>12} {:>12} {:>10}\n",
        "rank", "order", "aic", "bic", "rmse"
    ));
    for (rank, c) in candidates.iter().enumerate() {
        let order = format!("({},{},{})", c.p, c.d, c.q);
        out.push_str(&format!(
            "{:>4}  {:<12} {:>12.4} {:>12.4} {:>10.4}\n",
            rank + 1,
            order,
            c.aic,
            c.bic,
            c.rmse
        ));
    }
    out
}

use crate::config::SimulationConfig;
use crate::data::PriceSeries;
use crate::engine::backtest::simulate;
use crate::error::{Result, SimulationError};
use crate::metrics::SummaryMetrics;
use indexmap::IndexMap;
use rayon::prelude::*;

//a (short, long) window combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowPair {
    pub short: usize,
    pub long: usize,
}

//every valid window pair from the candidate lists, sorted by (short, long)
pub fn window_grid(shorts: &[usize], longs: &[usize]) -> Vec<WindowPair> {
    let mut grid: Vec<WindowPair> = shorts
        .iter()
        .flat_map(|&short| {
            longs
                .iter()
                .filter(move |&&long| short > 0 && short < long)
                .map(move |&long| WindowPair { short, long })
        })
        .collect();
    grid.sort();
    grid.dedup();
    grid
}

//runs one independent simulation per window pair in parallel
//other parameters come from the base config, results keep grid order
pub fn run_sweep(
    prices: &PriceSeries,
    base: &SimulationConfig,
    shorts: &[usize],
    longs: &[usize],
) -> Result<IndexMap<WindowPair, SummaryMetrics>> {
    let grid = window_grid(shorts, longs);
    if grid.is_empty() {
        return Err(SimulationError::invalid(
            "sweep has no window pair with short < long",
        ));
    }

    let results: Vec<(WindowPair, SummaryMetrics)> = grid
        .par_iter()
        .map(|&pair| -> Result<(WindowPair, SummaryMetrics)> {
            let config = SimulationConfig {
                short_window: pair.short,
                long_window: pair.long,
                ..base.clone()
            };
            let result = simulate(prices, &config)?;
            let summary = SummaryMetrics::from_run(
                &result.equity_curve,
                &result.trades,
                base.initial_capital,
            );
            Ok((pair, summary))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(runs = results.len(), "parameter sweep finished");

    Ok(results.into_iter().collect())
}

//the pair with the highest total return, ties keep the earlier pair
pub fn best_by_return(
    results: &IndexMap<WindowPair, SummaryMetrics>,
) -> Option<(&WindowPair, &SummaryMetrics)> {
    results.iter().fold(None, |best, candidate| match best {
        Some((_, current)) if current.total_return >= candidate.1.total_return => best,
        _ => Some(candidate),
    })
}

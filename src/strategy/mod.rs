pub mod sma_crossover;

use crate::error::{Result, SimulationError};

//moving average series aligned with its input
//entries before the window is filled are None
pub type SmaSeries = Vec<Option<f64>>;

//calculates a simple moving average series with a sliding window sum
//a window longer than the input yields an all-None series
pub fn sma_series(prices: &[f64], window: usize) -> Result<SmaSeries> {
    if window == 0 {
        return Err(SimulationError::invalid("sma window must be positive"));
    }

    let mut series = vec![None; prices.len()];
    let mut running_sum = 0.0;

    for (i, &price) in prices.iter().enumerate() {
        running_sum += price;
        if i >= window {
            running_sum -= prices[i - window];
        }
        if i + 1 >= window {
            series[i] = Some(running_sum / window as f64);
        }
    }

    Ok(series)
}

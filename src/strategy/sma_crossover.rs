use crate::error::Result;
use crate::strategy::{sma_series, SmaSeries};

//direction of a moving average crossover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    //short sma crosses above long sma
    Bullish,
    //short sma crosses below long sma
    Bearish,
}

//short and long sma series precomputed over one price series
#[derive(Debug, Clone)]
pub struct SmaCrossoverStrategy {
    short_sma: SmaSeries,
    long_sma: SmaSeries,
}

impl SmaCrossoverStrategy {
    pub fn new(prices: &[f64], short_window: usize, long_window: usize) -> Result<Self> {
        Ok(SmaCrossoverStrategy {
            short_sma: sma_series(prices, short_window)?,
            long_sma: sma_series(prices, long_window)?,
        })
    }

    //short minus long sma, None while either is undefined
    pub fn spread_at(&self, index: usize) -> Option<f64> {
        let short = (*self.short_sma.get(index)?)?;
        let long = (*self.long_sma.get(index)?)?;
        Some(short - long)
    }

    //returns true if both averages are defined at index and index - 1
    pub fn is_ready(&self, index: usize) -> bool {
        index > 0 && self.spread_at(index).is_some() && self.spread_at(index - 1).is_some()
    }

    //checks for a crossover between index - 1 and index
    //returns none if there is no crossover or either average is undefined
    pub fn crossover_at(&self, index: usize) -> Option<Crossover> {
        if index == 0 {
            return None;
        }
        let diff = self.spread_at(index)?;
        let prev_diff = self.spread_at(index - 1)?;

        if prev_diff <= 0.0 && diff > 0.0 {
            Some(Crossover::Bullish)
        } else if prev_diff >= 0.0 && diff < 0.0 {
            Some(Crossover::Bearish)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_prices_never_cross() {
        let prices = vec![100.0; 10];
        let strategy = SmaCrossoverStrategy::new(&prices, 2, 3).unwrap();

        for i in 0..prices.len() {
            assert_eq!(strategy.crossover_at(i), None);
        }
    }

    #[test]
    fn test_bullish_then_bearish() {
        //spread is -0.5, -0.5, 0, +1.17, +1, -0.67, -1.83 from index 2
        let prices = [10.0, 9.0, 8.0, 7.0, 9.0, 12.0, 12.0, 8.0, 5.0];
        let strategy = SmaCrossoverStrategy::new(&prices, 2, 3).unwrap();

        let signals: Vec<_> = (0..prices.len())
            .filter_map(|i| strategy.crossover_at(i).map(|c| (i, c)))
            .collect();

        assert_eq!(signals, vec![(5, Crossover::Bullish), (7, Crossover::Bearish)]);
    }

    #[test]
    fn test_touching_zero_counts_as_crossing() {
        //spread goes negative, to zero, then positive
        let strategy = SmaCrossoverStrategy {
            short_sma: vec![Some(1.0), Some(2.0), Some(3.0)],
            long_sma: vec![Some(2.0), Some(2.0), Some(2.0)],
        };

        assert_eq!(strategy.crossover_at(1), None);
        assert_eq!(strategy.crossover_at(2), Some(Crossover::Bullish));
    }

    #[test]
    fn test_undefined_history_has_no_signal() {
        let prices = [1.0, 2.0, 3.0, 4.0];
        let strategy = SmaCrossoverStrategy::new(&prices, 2, 3).unwrap();

        assert!(!strategy.is_ready(2));
        assert!(strategy.is_ready(3));
        assert_eq!(strategy.spread_at(1), None);
        assert_eq!(strategy.crossover_at(2), None);
        assert_eq!(strategy.crossover_at(99), None);
    }
}

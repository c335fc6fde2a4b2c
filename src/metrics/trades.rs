use crate::engine::execution::{Side, Trade};
use serde::Serialize;
use std::collections::VecDeque;

//a buy matched with the sell that closed it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundTrip {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    pub exit_price: f64,
}

impl RoundTrip {
    //per-unit price change
    pub fn price_change(&self) -> f64 {
        self.exit_price - self.entry_price
    }

    pub fn return_ratio(&self) -> f64 {
        self.price_change() / self.entry_price
    }

    pub fn is_win(&self) -> bool {
        self.exit_price > self.entry_price
    }
}

//pairs each sell with the oldest unmatched buy
//sells with no open buy are skipped, buys still open at the end are not closed trades
pub fn closed_trades(trades: &[Trade]) -> Vec<RoundTrip> {
    let mut open_buys: VecDeque<&Trade> = VecDeque::new();
    let mut round_trips = Vec::new();

    for trade in trades {
        match trade.side {
            Side::Buy => open_buys.push_back(trade),
            Side::Sell => match open_buys.pop_front() {
                Some(entry) => round_trips.push(RoundTrip {
                    entry_index: entry.index,
                    exit_index: trade.index,
                    entry_price: entry.price,
                    exit_price: trade.price,
                }),
                None => {
                    tracing::warn!(index = trade.index, "ignoring sell with no open buy");
                }
            },
        }
    }

    round_trips
}

//wins / closed trades, 0 with no closed trades
pub fn win_rate(trades: &[Trade]) -> f64 {
    let round_trips = closed_trades(trades);
    if round_trips.is_empty() {
        return 0.0;
    }

    let wins = round_trips.iter().filter(|rt| rt.is_win()).count();
    wins as f64 / round_trips.len() as f64
}

//mean of (exit - entry) / entry over closed trades, 0 with none
pub fn average_trade_return(trades: &[Trade]) -> f64 {
    let round_trips = closed_trades(trades);
    if round_trips.is_empty() {
        return 0.0;
    }

    round_trips.iter().map(RoundTrip::return_ratio).sum::<f64>() / round_trips.len() as f64
}

//gross per-unit profit over gross per-unit loss
//infinite with profits and no losses, 0 with neither
pub fn profit_factor(trades: &[Trade]) -> f64 {
    let (gross_profit, gross_loss) = closed_trades(trades)
        .iter()
        .map(RoundTrip::price_change)
        .fold((0.0, 0.0), |(profit, loss), change| {
            if change > 0.0 {
                (profit + change, loss)
            } else {
                (profit, loss - change)
            }
        });

    if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(index: usize, side: Side, price: f64) -> Trade {
        Trade {
            index,
            side,
            price,
            quantity: 1.0,
            fee: 0.0,
        }
    }

    fn two_round_trips() -> Vec<Trade> {
        vec![
            trade(0, Side::Buy, 100.0),
            trade(1, Side::Sell, 110.0),
            trade(2, Side::Buy, 90.0),
            trade(3, Side::Sell, 80.0),
        ]
    }

    #[test]
    fn test_pairs_in_order() {
        let round_trips = closed_trades(&two_round_trips());
        assert_eq!(round_trips.len(), 2);
        assert_eq!(round_trips[0].entry_index, 0);
        assert_eq!(round_trips[0].exit_index, 1);
        assert_eq!(round_trips[1].entry_price, 90.0);
        assert_eq!(round_trips[1].exit_price, 80.0);
    }

    #[test]
    fn test_mixed_outcome_metrics() {
        let trades = two_round_trips();
        assert!((win_rate(&trades) - 0.5).abs() < 1e-12);

        let expected = (0.1 + (-10.0 / 90.0)) / 2.0;
        assert!((average_trade_return(&trades) - expected).abs() < 1e-12);
        assert!((profit_factor(&trades) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_open_buy_only_is_neutral() {
        let trades = vec![trade(4, Side::Buy, 100.0)];
        assert_eq!(win_rate(&trades), 0.0);
        assert_eq!(average_trade_return(&trades), 0.0);
        assert_eq!(profit_factor(&trades), 0.0);
    }

    #[test]
    fn test_empty_log_is_neutral() {
        assert_eq!(win_rate(&[]), 0.0);
        assert_eq!(average_trade_return(&[]), 0.0);
        assert_eq!(profit_factor(&[]), 0.0);
    }

    #[test]
    fn test_orphan_sell_is_skipped() {
        let trades = vec![
            trade(0, Side::Sell, 50.0),
            trade(1, Side::Buy, 100.0),
            trade(2, Side::Sell, 120.0),
        ];
        let round_trips = closed_trades(&trades);
        assert_eq!(round_trips.len(), 1);
        assert_eq!(round_trips[0].entry_index, 1);
        assert_eq!(win_rate(&trades), 1.0);
    }

    #[test]
    fn test_profit_factor_without_losses_is_infinite() {
        let trades = vec![trade(0, Side::Buy, 10.0), trade(1, Side::Sell, 12.0)];
        assert_eq!(profit_factor(&trades), f64::INFINITY);
    }

    #[test]
    fn test_breakeven_trade_is_not_a_win() {
        let trades = vec![trade(0, Side::Buy, 10.0), trade(1, Side::Sell, 10.0)];
        assert_eq!(win_rate(&trades), 0.0);
        assert_eq!(profit_factor(&trades), 0.0);
    }
}

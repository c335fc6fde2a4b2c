use crossover::prelude::*;
use crossover::strategy::sma_crossover::Crossover;

fn series(prices: &[f64]) -> PriceSeries {
    PriceSeries::new(prices.to_vec()).unwrap()
}

fn trade(index: usize, side: Side, price: f64) -> Trade {
    Trade {
        index,
        side,
        price,
        quantity: 1.0,
        fee: 0.0,
    }
}

#[test]
fn flat_prices_never_trade() {
    let config = SimulationConfig {
        initial_capital: 5000.0,
        ..SimulationConfig::with_windows(2, 3)
    };
    let result = simulate(&series(&[100.0; 12]), &config).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.equity_curve, vec![5000.0; 12]);
}

#[test]
fn single_crossover_up_stays_open_with_fees_and_slippage() {
    //spread is 0 until index 4, then turns positive and never crosses back
    let prices = [100.0, 100.0, 100.0, 100.0, 101.0, 102.0, 103.0, 104.0];
    let config = SimulationConfig {
        initial_capital: 1000.0,
        fee_fraction: 0.001,
        slippage_bps: 10.0,
        ..SimulationConfig::with_windows(2, 3)
    };
    let result = simulate(&series(&prices), &config).unwrap();

    assert_eq!(result.trades.len(), 1);
    let buy = result.trades[0];
    assert_eq!(buy.side, Side::Buy);
    assert_eq!(buy.index, 4);

    let execution_price = 101.0 * 1.001;
    let invested = 1000.0 / 1.001;
    let shares = invested / execution_price;
    assert!((buy.price - execution_price).abs() < 1e-9);
    assert!((buy.quantity - shares).abs() < 1e-9);
    assert!((buy.fee - 0.001 * invested).abs() < 1e-9);

    //never force-closed, marked at the last close
    assert_eq!(result.final_cash, 0.0);
    assert!(result.has_open_position());
    assert!((result.final_equity() - shares * 104.0).abs() < 1e-9);

    assert_eq!(win_rate(&result.trades), 0.0);
    assert_eq!(average_trade_return(&result.trades), 0.0);
    assert_eq!(profit_factor(&result.trades), 0.0);

    //only the buy has traded, for the invested amount net of the fee
    let summary = SummaryMetrics::from_run(&result.equity_curve, &result.trades, 1000.0);
    assert!((summary.turnover - invested).abs() < 1e-9);
    assert!((summary.turnover + summary.total_fees - 1000.0).abs() < 1e-9);
}

#[test]
fn stop_loss_forces_exit_before_crossover() {
    //buy at index 4 (101), price gaps down to 95 while the short sma is still above the long sma
    let prices = [100.0, 100.0, 100.0, 100.0, 101.0, 102.0, 101.0, 120.0, 95.0, 90.0];
    let strategy = SmaCrossoverStrategy::new(&prices, 2, 3).unwrap();
    assert_ne!(
        strategy.crossover_at(8),
        Some(Crossover::Bearish),
        "the exit at index 8 must come from the stop-loss alone"
    );

    let without_stop = simulate(&series(&prices), &SimulationConfig::with_windows(2, 3)).unwrap();
    assert!(without_stop.trades.iter().all(|t| t.index != 8));

    let config = SimulationConfig {
        stop_loss_fraction: Some(0.05),
        ..SimulationConfig::with_windows(2, 3)
    };
    let result = simulate(&series(&prices), &config).unwrap();

    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.trades[0].side, Side::Buy);
    assert_eq!(result.trades[0].index, 4);
    assert_eq!(result.trades[1].side, Side::Sell);
    assert_eq!(result.trades[1].index, 8);
    assert_eq!(result.trades[1].price, 95.0);
}

#[test]
fn metrics_over_mixed_trade_log() {
    let trades = vec![
        trade(0, Side::Buy, 100.0),
        trade(5, Side::Sell, 110.0),
        trade(9, Side::Buy, 90.0),
        trade(14, Side::Sell, 80.0),
    ];

    assert!((win_rate(&trades) - 0.5).abs() < 1e-12);
    assert!((average_trade_return(&trades) + 0.005_555_555_555_555).abs() < 1e-9);
    assert!((profit_factor(&trades) - 1.0).abs() < 1e-12);
}

#[test]
fn unmatched_buy_has_neutral_metrics() {
    let trades = vec![trade(3, Side::Buy, 100.0)];

    assert_eq!(win_rate(&trades), 0.0);
    assert_eq!(average_trade_return(&trades), 0.0);
    assert_eq!(profit_factor(&trades), 0.0);
}

#[test]
fn full_allocation_buy_empties_cash() {
    let prices = [100.0, 100.0, 100.0, 100.0, 101.0, 102.0];
    let config = SimulationConfig {
        fee_fraction: 0.0025,
        ..SimulationConfig::with_windows(2, 3)
    };
    let result = simulate(&series(&prices), &config).unwrap();

    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.final_cash, 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    let prices: Vec<f64> = (0..400)
        .map(|i| 80.0 + (i as f64 * 0.09).sin() * 12.0 + (i as f64 * 0.31).cos() * 3.0)
        .collect();
    let config = SimulationConfig {
        fee_fraction: 0.0015,
        slippage_bps: 5.0,
        stop_loss_fraction: Some(0.04),
        allocation_fraction: 0.6,
        ..SimulationConfig::with_windows(7, 25)
    };

    let first = simulate(&series(&prices), &config).unwrap();
    let second = simulate(&series(&prices), &config).unwrap();

    assert_eq!(first, second);
    assert!(!first.trades.is_empty());
}

#[test]
fn trade_log_alternates_starting_with_buy() {
    let prices: Vec<f64> = (0..300)
        .map(|i| 50.0 + (i as f64 * 0.15).sin() * 6.0)
        .collect();
    let config = SimulationConfig {
        stop_loss_fraction: Some(0.02),
        ..SimulationConfig::with_windows(3, 12)
    };
    let result = simulate(&series(&prices), &config).unwrap();

    assert!(result.trades.len() >= 2);
    for (i, trade) in result.trades.iter().enumerate() {
        let expected = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        assert_eq!(trade.side, expected);
    }
}

#[test]
fn equity_curve_matches_summary() {
    let prices: Vec<f64> = (0..120).map(|i| 20.0 + (i as f64 * 0.2).sin()).collect();
    let config = SimulationConfig::with_windows(4, 10);
    let result = simulate(&series(&prices), &config).unwrap();
    let summary = SummaryMetrics::from_run(&result.equity_curve, &result.trades, 10_000.0);

    assert_eq!(result.equity_curve.len(), prices.len());
    assert!(summary.max_drawdown <= 0.0);
    assert!((summary.total_return - total_return(&result.equity_curve)).abs() < 1e-15);
    assert_eq!(summary.open_position, result.has_open_position());
}

#[test]
fn invalid_arguments_are_rejected() {
    assert!(matches!(
        PriceSeries::new(vec![]),
        Err(SimulationError::InvalidArgument(_))
    ));

    let prices = series(&[1.0, 2.0, 3.0]);
    let bad = SimulationConfig {
        initial_capital: -1.0,
        ..SimulationConfig::with_windows(1, 2)
    };
    assert!(matches!(
        simulate(&prices, &bad),
        Err(SimulationError::InvalidArgument(_))
    ));
}

use crate::engine::execution::{Side, Trade};
use crate::metrics::timeseries::{calculate_returns, max_drawdown, total_return};
use crate::metrics::trades::{average_trade_return, closed_trades, profit_factor, win_rate};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//trading periods per year for daily bars
const PERIODS_PER_YEAR: f64 = 252.0;

//summary metrics for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub initial_capital: f64,
    pub final_equity: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    pub average_trade_return: f64,
    pub profit_factor: f64,
    //executed trades, buys and sells
    pub num_trades: usize,
    pub num_closed_trades: usize,
    pub total_fees: f64,
    //traded notional, buys and sells
    pub turnover: f64,
    pub open_position: bool,
}

impl SummaryMetrics {
    //calculate summary metrics from equity curve and trade log
    pub fn from_run(equity_curve: &[f64], trades: &[Trade], initial_capital: f64) -> Self {
        let final_equity = equity_curve.last().copied().unwrap_or(initial_capital);

        let num_buys = trades.iter().filter(|t| t.side == Side::Buy).count();
        let num_closed_trades = closed_trades(trades).len();

        SummaryMetrics {
            initial_capital,
            final_equity,
            total_return: total_return(equity_curve),
            max_drawdown: max_drawdown(equity_curve),
            sharpe_ratio: calculate_sharpe_ratio(&calculate_returns(equity_curve)),
            win_rate: win_rate(trades),
            average_trade_return: average_trade_return(trades),
            profit_factor: profit_factor(trades),
            num_trades: trades.len(),
            num_closed_trades,
            total_fees: trades.iter().map(|t| t.fee).sum(),
            turnover: trades.iter().map(Trade::notional_value).sum(),
            open_position: num_buys > num_closed_trades,
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        let rows = [
            ("Initial Capital", format!("${:.2}", self.initial_capital)),
            ("Final Equity", format!("${:.2}", self.final_equity)),
            ("Total Return", format!("{:.2}%", self.total_return * 100.0)),
            ("Max Drawdown", format!("{:.2}%", self.max_drawdown * 100.0)),
            ("Sharpe Ratio", format!("{:.3}", self.sharpe_ratio)),
            ("Trades Executed", format!("{}", self.num_trades)),
            ("Closed Trades", format!("{}", self.num_closed_trades)),
            ("Win Rate", format!("{:.2}%", self.win_rate * 100.0)),
            (
                "Avg Trade Return",
                format!("{:.2}%", self.average_trade_return * 100.0),
            ),
            ("Profit Factor", format_profit_factor(self.profit_factor)),
            ("Total Fees", format!("${:.2}", self.total_fees)),
            ("Turnover", format!("${:.2}", self.turnover)),
            (
                "Open Position",
                if self.open_position { "yes" } else { "no" }.to_string(),
            ),
        ];

        for (label, value) in rows {
            table.add_row(Row::new(vec![Cell::new(label), Cell::new(&value)]));
        }

        table
    }
}

fn format_profit_factor(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.3}", value)
    }
}

//annualised mean over standard deviation of per-period returns
fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if !std_dev.is_finite() || std_dev == 0.0 {
        return 0.0;
    }

    (mean / std_dev) * PERIODS_PER_YEAR.sqrt()
}

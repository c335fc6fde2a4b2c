pub mod summary;
pub mod timeseries;
pub mod trades;

pub use summary::SummaryMetrics;
pub use timeseries::{calculate_equity_curve, max_drawdown, total_return, EquityPoint};
pub use trades::{average_trade_return, closed_trades, profit_factor, win_rate, RoundTrip};

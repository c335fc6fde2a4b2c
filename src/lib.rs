//a Rust-based moving-average crossover backtesting engine for daily closing prices

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod portfolio;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{RunConfiguration, SimulationConfig};
    pub use crate::data::{load_csv, PriceHistory, PriceSeries};
    pub use crate::engine::{
        best_by_return, run_sweep, simulate, BacktestEngine, EquityCurve, ExecutionModel, Side,
        SimulationResult, Trade, WindowPair,
    };
    pub use crate::error::SimulationError;
    pub use crate::metrics::{
        average_trade_return, calculate_equity_curve, max_drawdown, profit_factor, total_return,
        win_rate, EquityPoint, SummaryMetrics,
    };
    pub use crate::portfolio::{Account, Position};
    pub use crate::strategy::{sma_crossover::SmaCrossoverStrategy, sma_series, SmaSeries};
}

pub mod backtest;
pub mod execution;
pub mod sweep;

pub use backtest::{simulate, BacktestEngine, EquityCurve, ExitReason, SimulationResult};
pub use execution::{ExecutionModel, Side, Trade};
pub use sweep::{best_by_return, run_sweep, window_grid, WindowPair};

use crate::config::SimulationConfig;
use crate::data::PriceSeries;
use crate::engine::execution::{ExecutionModel, Trade};
use crate::error::Result;
use crate::portfolio::{Account, Position};
use crate::strategy::sma_crossover::{Crossover, SmaCrossoverStrategy};

//account value per period, same length as the price series
pub type EquityCurve = Vec<f64>;

//result of a simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub equity_curve: EquityCurve,
    //executed trades only, in index order
    pub trades: Vec<Trade>,
    //cash left at the end
    pub final_cash: f64,
    //position left at the end, open longs are not force-closed
    pub final_position: Position,
}

impl SimulationResult {
    pub fn final_equity(&self) -> f64 {
        self.equity_curve.last().copied().unwrap_or(0.0)
    }

    //returns true if the run ended holding shares
    pub fn has_open_position(&self) -> bool {
        self.final_position.is_long()
    }
}

//why a long position was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Crossover,
    StopLoss,
}

//runs the crossover state machine over a price series
//holds only validated parameters, every run starts from fresh state
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: SimulationConfig,
    execution: ExecutionModel,
}

impl BacktestEngine {
    //creates a new engine, rejecting invalid parameters
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let execution = ExecutionModel::new(config.slippage_fraction(), config.fee_fraction);
        Ok(BacktestEngine { config, execution })
    }

    //walks the series once, deciding at each index from state built by earlier indices
    pub fn run(&self, prices: &PriceSeries) -> Result<SimulationResult> {
        let config = &self.config;
        let strategy = SmaCrossoverStrategy::new(prices, config.short_window, config.long_window)?;

        let mut account = Account::new(config.initial_capital);

        //no decisions before the long window is filled
        let mut equity_curve = vec![config.initial_capital; prices.len()];

        for i in config.long_window..prices.len() {
            if !strategy.is_ready(i) {
                equity_curve[i] = equity_curve[i - 1];
                continue;
            }

            let price = prices[i];
            let crossover = strategy.crossover_at(i);

            match account.position {
                Position::Long { .. } => {
                    if let Some(reason) = self.exit_reason(&account.position, price, crossover) {
                        if let Some(trade) = account.close_long(i, price, &self.execution) {
                            tracing::debug!(?trade, ?reason, cash = account.cash, "closed long");
                        }
                    }
                }
                Position::Flat => {
                    if crossover == Some(Crossover::Bullish) {
                        if let Some(trade) = account.open_long(
                            i,
                            price,
                            config.allocation_fraction,
                            &self.execution,
                        ) {
                            tracing::debug!(?trade, cash = account.cash, "opened long");
                        }
                    }
                }
            }

            equity_curve[i] = account.equity(price);
        }

        if account.position.is_long() {
            tracing::debug!(
                shares = account.position.shares(),
                "series ended with an open position, marked to market"
            );
        }

        Ok(SimulationResult {
            equity_curve,
            trades: account.trade_log,
            final_cash: account.cash,
            final_position: account.position,
        })
    }

    //stop-loss takes precedence when both fire, it is still a single exit
    fn exit_reason(
        &self,
        position: &Position,
        price: f64,
        crossover: Option<Crossover>,
    ) -> Option<ExitReason> {
        let stop_hit = self
            .config
            .stop_loss_fraction
            .is_some_and(|stop| position.stop_triggered(price, stop));

        if stop_hit {
            Some(ExitReason::StopLoss)
        } else if crossover == Some(Crossover::Bearish) {
            Some(ExitReason::Crossover)
        } else {
            None
        }
    }
}

//validates the config and runs one simulation
pub fn simulate(prices: &PriceSeries, config: &SimulationConfig) -> Result<SimulationResult> {
    BacktestEngine::new(config.clone())?.run(prices)
}

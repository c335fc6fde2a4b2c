use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//basis points per unit fraction
const BPS_PER_UNIT: f64 = 10_000.0;

//parameters of one crossover simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub short_window: usize,
    pub long_window: usize,

    //starting cash
    pub initial_capital: f64,

    //share of available cash committed on each entry, in (0, 1]
    pub allocation_fraction: f64,

    //fee charged on each fill as a fraction of its notional
    pub fee_fraction: f64,

    //adverse execution offset in basis points
    pub slippage_bps: f64,

    //exit when price falls this fraction below the entry price (None disables)
    pub stop_loss_fraction: Option<f64>,

    //first opening price of the instrument, used for the affordability check
    pub opening_price: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            short_window: 20,
            long_window: 50,
            initial_capital: 10_000.0,
            allocation_fraction: 1.0,
            fee_fraction: 0.0,
            slippage_bps: 0.0,
            stop_loss_fraction: None,
            opening_price: None,
        }
    }
}

impl SimulationConfig {
    //creates a config with the given windows and defaults elsewhere
    pub fn with_windows(short_window: usize, long_window: usize) -> Self {
        SimulationConfig {
            short_window,
            long_window,
            ..Default::default()
        }
    }

    //slippage expressed as a price fraction
    pub fn slippage_fraction(&self) -> f64 {
        self.slippage_bps / BPS_PER_UNIT
    }

    //checks every parameter range before a run is allowed to start
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(SimulationError::invalid("window lengths must be positive"));
        }

        if self.short_window >= self.long_window {
            return Err(SimulationError::invalid(format!(
                "short window ({}) must be smaller than long window ({})",
                self.short_window, self.long_window
            )));
        }

        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(SimulationError::invalid(format!(
                "initial capital must be positive, got {}",
                self.initial_capital
            )));
        }

        if !(self.allocation_fraction > 0.0 && self.allocation_fraction <= 1.0) {
            return Err(SimulationError::invalid(format!(
                "allocation fraction must be in (0, 1], got {}",
                self.allocation_fraction
            )));
        }

        //a sell must credit proceeds - fee > 0, so the fee stays below the notional
        if !(self.fee_fraction.is_finite() && (0.0..1.0).contains(&self.fee_fraction)) {
            return Err(SimulationError::invalid(format!(
                "fee fraction must be in [0, 1), got {}",
                self.fee_fraction
            )));
        }

        if !(self.slippage_bps.is_finite() && self.slippage_bps >= 0.0) {
            return Err(SimulationError::invalid(format!(
                "slippage must be non-negative, got {} bps",
                self.slippage_bps
            )));
        }

        //a sell at price * (1 - slippage) must stay positive
        if self.slippage_fraction() >= 1.0 {
            return Err(SimulationError::invalid(format!(
                "slippage must be below {} bps, got {}",
                BPS_PER_UNIT, self.slippage_bps
            )));
        }

        if let Some(stop) = self.stop_loss_fraction {
            if !(0.0..1.0).contains(&stop) {
                return Err(SimulationError::invalid(format!(
                    "stop-loss fraction must be in [0, 1), got {}",
                    stop
                )));
            }
        }

        if let Some(open) = self.opening_price {
            if self.initial_capital < open {
                return Err(SimulationError::invalid(format!(
                    "capital ({:.2}) is too low to buy one share at the opening price ({:.2})",
                    self.initial_capital, open
                )));
            }
        }

        Ok(())
    }
}

//complete run configuration for the command line tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfiguration {
    //data
    pub data_path: PathBuf,

    //strategy
    #[serde(default)]
    pub simulation: SimulationConfig,

    //optional output paths
    #[serde(default)]
    pub output_equity_csv: Option<PathBuf>,
    #[serde(default)]
    pub output_trades_csv: Option<PathBuf>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        RunConfiguration {
            data_path: PathBuf::from("data.csv"),
            simulation: SimulationConfig::default(),
            output_equity_csv: None,
            output_trades_csv: None,
        }
    }
}

impl RunConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

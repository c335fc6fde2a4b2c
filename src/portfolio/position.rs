use serde::{Deserialize, Serialize};

//the single-instrument position held during a simulation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long {
        //always positive
        shares: f64,
        //execution price of the opening buy, slippage included
        entry_price: f64,
    },
}

impl Position {
    //returns true if the position is flat (no shares held)
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    //returns true if the position is long
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    pub fn shares(&self) -> f64 {
        match self {
            Position::Flat => 0.0,
            Position::Long { shares, .. } => *shares,
        }
    }

    //market value of the held shares at a given price
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares() * price
    }

    //returns true if price has fallen below the stop level for this entry
    pub fn stop_triggered(&self, price: f64, stop_loss_fraction: f64) -> bool {
        match self {
            Position::Flat => false,
            Position::Long { entry_price, .. } => price < entry_price * (1.0 - stop_loss_fraction),
        }
    }
}

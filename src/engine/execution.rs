use serde::{Deserialize, Serialize};
use std::fmt;

//trade side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

//an executed trade, recorded once per position transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    //period index the trade executed at
    pub index: usize,
    pub side: Side,
    //execution price, slippage included
    pub price: f64,
    pub quantity: f64,
    pub fee: f64,
}

impl Trade {
    //returns the notional value of the trade
    pub fn notional_value(&self) -> f64 {
        self.price * self.quantity
    }
}

//fill computed for a buy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyFill {
    pub price: f64,
    pub shares: f64,
    //notional spent on shares
    pub invested: f64,
    pub fee: f64,
    //total cash debited (invested + fee)
    pub cash_debit: f64,
}

//fill computed for a full liquidation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellFill {
    pub price: f64,
    pub proceeds: f64,
    pub fee: f64,
    //total cash credited (proceeds - fee)
    pub cash_credit: f64,
}

//prices fills against the close with proportional slippage and fees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionModel {
    pub slippage_fraction: f64,
    pub fee_fraction: f64,
}

impl ExecutionModel {
    pub fn new(slippage_fraction: f64, fee_fraction: f64) -> Self {
        ExecutionModel {
            slippage_fraction,
            fee_fraction,
        }
    }

    //buys fill above the quoted price, sells below
    pub fn execution_price(&self, price: f64, side: Side) -> f64 {
        match side {
            Side::Buy => price * (1.0 + self.slippage_fraction),
            Side::Sell => price * (1.0 - self.slippage_fraction),
        }
    }

    //spends a cash budget on shares
    //the budget covers the fee as well, so exactly `budget` leaves the account
    pub fn buy(&self, price: f64, budget: f64) -> BuyFill {
        let execution_price = self.execution_price(price, Side::Buy);
        let invested = budget / (1.0 + self.fee_fraction);
        let fee = self.fee_fraction * invested;

        BuyFill {
            price: execution_price,
            shares: invested / execution_price,
            invested,
            fee,
            cash_debit: budget,
        }
    }

    //sells all shares
    pub fn sell(&self, price: f64, shares: f64) -> SellFill {
        let execution_price = self.execution_price(price, Side::Sell);
        let proceeds = shares * execution_price;
        let fee = self.fee_fraction * proceeds;

        SellFill {
            price: execution_price,
            proceeds,
            fee,
            cash_credit: proceeds - fee,
        }
    }
}

use crate::engine::execution::{ExecutionModel, Side, Trade};
use crate::portfolio::position::Position;

//cash plus a single long-only position, with the log of executed trades
#[derive(Debug, Clone)]
pub struct Account {
    //current cash, never negative
    pub cash: f64,

    //current position
    pub position: Position,

    //complete trade log
    pub trade_log: Vec<Trade>,
}

impl Account {
    //creates a new flat account with initial capital
    pub fn new(initial_capital: f64) -> Self {
        Account {
            cash: initial_capital,
            position: Position::Flat,
            trade_log: Vec::new(),
        }
    }

    //opens a long position with a fraction of available cash
    //returns none if already long or there is no cash to spend
    pub fn open_long(
        &mut self,
        index: usize,
        price: f64,
        allocation_fraction: f64,
        execution: &ExecutionModel,
    ) -> Option<Trade> {
        if self.position.is_long() || self.cash <= 0.0 {
            return None;
        }

        let budget = allocation_fraction * self.cash;
        let fill = execution.buy(price, budget);
        if fill.shares <= 0.0 {
            return None;
        }

        self.cash = (self.cash - fill.cash_debit).max(0.0);
        self.position = Position::Long {
            shares: fill.shares,
            entry_price: fill.price,
        };

        let trade = Trade {
            index,
            side: Side::Buy,
            price: fill.price,
            quantity: fill.shares,
            fee: fill.fee,
        };
        self.trade_log.push(trade);
        Some(trade)
    }

    //liquidates the whole position
    //returns none if flat
    pub fn close_long(
        &mut self,
        index: usize,
        price: f64,
        execution: &ExecutionModel,
    ) -> Option<Trade> {
        let shares = match self.position {
            Position::Flat => return None,
            Position::Long { shares, .. } => shares,
        };

        let fill = execution.sell(price, shares);
        self.cash += fill.cash_credit;
        self.position = Position::Flat;

        let trade = Trade {
            index,
            side: Side::Sell,
            price: fill.price,
            quantity: shares,
            fee: fill.fee,
        };
        self.trade_log.push(trade);
        Some(trade)
    }

    //cash plus position marked at price
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.position.market_value(price)
    }
}

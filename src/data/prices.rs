use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

//chronologically ordered closing prices for one instrument
//validated once on construction and read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    //creates a price series, rejecting empty input and non-positive or non-finite prices
    pub fn new(prices: Vec<f64>) -> Result<Self> {
        if prices.is_empty() {
            return Err(SimulationError::invalid("price series is empty"));
        }

        if let Some((index, price)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(SimulationError::invalid(format!(
                "price at index {} must be positive and finite, got {}",
                index, price
            )));
        }

        Ok(PriceSeries(prices))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for PriceSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = SimulationError;

    fn try_from(prices: Vec<f64>) -> Result<Self> {
        PriceSeries::new(prices)
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.0
    }
}

use serde::{Deserialize, Serialize};

//a point in the equity curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    pub equity: f64,
    //fractional decline from the running peak, <= 0
    pub drawdown: f64,
    pub returns: f64,
}

//annotates an equity curve with drawdowns and per-period returns
pub fn calculate_equity_curve(equity_values: &[f64]) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(equity_values.len());
    let mut peak = f64::NEG_INFINITY;
    let mut prev_equity: Option<f64> = None;

    for (index, &equity) in equity_values.iter().enumerate() {
        if equity > peak {
            peak = equity;
        }

        let drawdown = if peak > 0.0 && equity.is_finite() {
            (equity - peak) / peak
        } else {
            0.0
        };

        let returns = match prev_equity {
            Some(prev) if prev != 0.0 => (equity - prev) / prev,
            _ => 0.0,
        };

        curve.push(EquityPoint {
            index,
            equity,
            drawdown,
            returns,
        });
        prev_equity = Some(equity);
    }

    curve
}

//(last - first) / first, 0 for an empty curve or a zero start
pub fn total_return(equity_values: &[f64]) -> f64 {
    match (equity_values.first(), equity_values.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first,
        _ => 0.0,
    }
}

//most negative decline from a running peak, 0 if the curve never declines
//non-finite entries are treated as missing and skipped
pub fn max_drawdown(equity_values: &[f64]) -> f64 {
    let mut peak: Option<f64> = None;
    let mut worst = 0.0f64;

    for &value in equity_values.iter().filter(|v| v.is_finite()) {
        let current_peak = match peak {
            Some(p) if p >= value => p,
            _ => {
                peak = Some(value);
                value
            }
        };

        if current_peak > 0.0 {
            worst = worst.min((value - current_peak) / current_peak);
        }
    }

    worst
}

//calculates returns from equity values
pub fn calculate_returns(equity_values: &[f64]) -> Vec<f64> {
    equity_values
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

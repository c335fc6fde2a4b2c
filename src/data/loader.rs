use crate::config::SimulationConfig;
use crate::data::prices::PriceSeries;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "Open", default)]
    open: Option<f64>,
    #[serde(rename = "Close")]
    close: f64,
}

//closing prices plus whatever row metadata the file carried
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub dates: Vec<Option<NaiveDate>>,
    pub opens: Vec<Option<f64>>,
    pub closes: PriceSeries,
}

impl PriceHistory {
    //opening price of the first period, if the file had an open column
    pub fn first_open(&self) -> Option<f64> {
        self.opens.first().copied().flatten()
    }

    //checks capital against the first open unless an opening price is already set
    pub fn apply_open_check(&self, config: &mut SimulationConfig) {
        if config.opening_price.is_none() {
            config.opening_price = self.first_open();
        }
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

//loads a price history from a csv file with a "Close" column
//rows are kept in file order, the file must already be chronological
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut dates = Vec::new();
    let mut opens = Vec::new();
    let mut closes = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        let date = match record.date.as_deref() {
            Some(raw) if !raw.is_empty() => Some(parse_date(raw).context(format!(
                "Failed to parse date '{}' at line {}",
                raw,
                index + 2
            ))?),
            _ => None,
        };

        dates.push(date);
        opens.push(record.open);
        closes.push(record.close);
    }

    let closes = PriceSeries::new(closes).context(format!("Invalid close prices in {:?}", path))?;

    tracing::debug!(rows = closes.len(), path = ?path, "loaded price history");

    Ok(PriceHistory {
        dates,
        opens,
        closes,
    })
}

//accepts plain dates and full rfc3339 timestamps
fn parse_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    let timestamp = DateTime::parse_from_rfc3339(raw)?;
    Ok(timestamp.date_naive())
}

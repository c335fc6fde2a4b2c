pub mod loader;
pub mod prices;

pub use loader::{load_csv, PriceHistory};
pub use prices::PriceSeries;

//! Market data for pre-filling entry and stop levels.

mod csv_source;
mod lookup;
mod yahoo;

pub use csv_source::CsvProvider;
pub use lookup::MarketDataLookup;
pub use yahoo::{YahooConfig, YahooProvider};

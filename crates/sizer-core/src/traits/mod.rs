//! Core traits for the calculator.

mod data_source;

pub use data_source::MarketDataProvider;

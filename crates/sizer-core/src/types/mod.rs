//! Core data types for the calculator.

mod ohlcv;
mod position;
mod quote;

pub use ohlcv::DailyBar;
pub use position::{PositionRequest, PositionResult};
pub use quote::PriceQuote;

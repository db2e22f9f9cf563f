//! Core types and traits for the position size calculator.
//!
//! This crate provides the foundational building blocks including:
//! - Sizing inputs and outputs (PositionRequest, PositionResult)
//! - Market data types (PriceQuote, DailyBar)
//! - The market data provider trait

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, SizingError};
pub use types::*;
pub use traits::*;

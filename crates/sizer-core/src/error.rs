//! Error types for the position size calculator.

use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while sizing a position.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    /// The stop sits at or above the entry of a long position while a
    /// non-zero amount is at risk.
    #[error(
        "Invalid risk configuration: stop-loss {stop_loss_price} must be below entry {entry_price} (risk per share {risk_per_share})"
    )]
    InvalidRiskConfiguration {
        entry_price: Decimal,
        stop_loss_price: Decimal,
        risk_per_share: Decimal,
    },

    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: Decimal,
        reason: &'static str,
    },

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

/// Market data errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

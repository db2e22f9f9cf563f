//! Position sizing request and result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for a single sizing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequest {
    /// Total account value in dollars
    pub portfolio_size: Decimal,
    /// Share of the portfolio at risk, 0 to 100
    pub risk_percentage: Decimal,
    /// Planned entry price
    pub entry_price: Decimal,
    /// Price at which the position is exited
    pub stop_loss_price: Decimal,
}

impl PositionRequest {
    /// Create a new request.
    pub fn new(
        portfolio_size: Decimal,
        risk_percentage: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
    ) -> Self {
        Self {
            portfolio_size,
            risk_percentage,
            entry_price,
            stop_loss_price,
        }
    }
}

/// Computed position size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionResult {
    /// Dollars lost if the stop is hit
    pub risk_amount: Decimal,
    /// Entry minus stop
    pub risk_per_share: Decimal,
    /// Whole shares to buy
    pub shares: u64,
    /// Shares times entry price
    pub position_size: Decimal,
}

impl PositionResult {
    /// A result that buys nothing.
    pub fn empty(risk_per_share: Decimal) -> Self {
        Self {
            risk_amount: Decimal::ZERO,
            risk_per_share,
            shares: 0,
            position_size: Decimal::ZERO,
        }
    }
}

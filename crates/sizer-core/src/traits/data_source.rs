//! Market data provider trait definition.

use crate::error::DataError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Trait for market data providers used to pre-fill entry and stop levels.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent regular-market price for a symbol.
    async fn latest_price(&self, symbol: &str) -> Result<Decimal, DataError>;

    /// Get the daily low prices for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `start` - Start of the date range
    /// * `end` - End of the date range
    ///
    /// # Returns
    /// One low per daily bar, ordered from oldest to newest
    async fn daily_lows(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Decimal>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

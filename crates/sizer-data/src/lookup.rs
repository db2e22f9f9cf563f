//! Price and week-low lookup with a best-effort fallback.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use sizer_core::error::DataError;
use sizer_core::traits::MarketDataProvider;
use sizer_core::types::PriceQuote;
use std::time::Duration;
use tracing::{debug, warn};

/// Looks up the latest price and trailing low for a symbol.
///
/// `lookup` never fails: any provider error, malformed value or timeout
/// becomes `PriceQuote::Unavailable`. Use `try_lookup` to see the cause.
pub struct MarketDataLookup {
    provider: Box<dyn MarketDataProvider>,
    timeout: Duration,
    lookback: ChronoDuration,
}

impl MarketDataLookup {
    /// Create a lookup with a 10 second timeout and a 7 day window.
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(10),
            lookback: ChronoDuration::days(7),
        }
    }

    /// Set the bound on a whole lookup.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the trailing window, in calendar days, for the low.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback = ChronoDuration::days(i64::from(days));
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Look up a symbol as of now.
    pub async fn lookup(&self, symbol: &str) -> PriceQuote {
        self.lookup_at(symbol, Utc::now()).await
    }

    /// Look up a symbol with the window ending at `now`.
    pub async fn lookup_at(&self, symbol: &str, now: DateTime<Utc>) -> PriceQuote {
        match self.try_lookup_at(symbol, now).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(symbol, provider = self.provider.name(), error = %e, "Market data unavailable");
                PriceQuote::Unavailable
            }
        }
    }

    /// Look up a symbol as of now, surfacing the failure cause.
    pub async fn try_lookup(&self, symbol: &str) -> Result<PriceQuote, DataError> {
        self.try_lookup_at(symbol, Utc::now()).await
    }

    /// Look up a symbol with the window ending at `now`, surfacing the failure cause.
    pub async fn try_lookup_at(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<PriceQuote, DataError> {
        match tokio::time::timeout(self.timeout, self.fetch(symbol, now)).await {
            Ok(result) => result,
            Err(_) => Err(DataError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    async fn fetch(&self, symbol: &str, now: DateTime<Utc>) -> Result<PriceQuote, DataError> {
        let current_price = self.provider.latest_price(symbol).await?;
        ensure_positive("current price", current_price)?;

        let start = now.checked_sub_signed(self.lookback).ok_or_else(|| {
            DataError::InvalidData(format!(
                "lookback of {} days is out of range",
                self.lookback.num_days()
            ))
        })?;
        let lows = self.provider.daily_lows(symbol, start, now).await?;
        let week_low = lows.into_iter().min().ok_or(DataError::NoDataAvailable)?;
        ensure_positive("week low", week_low)?;

        debug!(symbol, %current_price, %week_low, "Market data retrieved");
        Ok(PriceQuote::available(current_price, week_low))
    }
}

fn ensure_positive(what: &str, value: Decimal) -> Result<(), DataError> {
    if value <= Decimal::ZERO {
        return Err(DataError::InvalidData(format!("{} is {}", what, value)));
    }
    Ok(())
}

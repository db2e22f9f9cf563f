//! Price quote returned by a market data lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price and trailing week low for a symbol.
///
/// A failed lookup is `Unavailable`, never a zero price. Callers fall back to
/// their own defaults when either accessor returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PriceQuote {
    /// Both values were retrieved
    Available {
        current_price: Decimal,
        week_low: Decimal,
    },
    /// The provider failed for any reason
    Unavailable,
}

impl PriceQuote {
    /// Create an available quote.
    pub fn available(current_price: Decimal, week_low: Decimal) -> Self {
        PriceQuote::Available {
            current_price,
            week_low,
        }
    }

    /// Latest regular-market price, if the lookup succeeded.
    pub fn current_price(&self) -> Option<Decimal> {
        match self {
            PriceQuote::Available { current_price, .. } => Some(*current_price),
            PriceQuote::Unavailable => None,
        }
    }

    /// Minimum daily low over the trailing week, if the lookup succeeded.
    pub fn week_low(&self) -> Option<Decimal> {
        match self {
            PriceQuote::Available { week_low, .. } => Some(*week_low),
            PriceQuote::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceQuote::Available { .. })
    }
}

impl Default for PriceQuote {
    fn default() -> Self {
        PriceQuote::Unavailable
    }
}

//! Stop-loss derivation and suggested entry/stop levels.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sizer_core::error::SizingError;
use sizer_core::types::PriceQuote;

use crate::position_sizer::{non_negative, percentage};

/// How the stop-loss price of a long position is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopLossRule {
    /// Absolute stop price
    Price { price: Decimal },
    /// Fixed percentage below entry
    PercentBelowEntry { percent: Decimal },
}

impl StopLossRule {
    /// Resolve the stop price for a given entry.
    pub fn stop_price(&self, entry_price: Decimal) -> Result<Decimal, SizingError> {
        match *self {
            StopLossRule::Price { price } => Ok(price),
            StopLossRule::PercentBelowEntry { percent } => {
                percentage("stop_loss_percentage", percent)?;
                non_negative("entry_price", entry_price)?;

                let keep = Decimal::ONE - percent / Decimal::ONE_HUNDRED;
                entry_price
                    .checked_mul(keep)
                    .ok_or_else(|| SizingError::Arithmetic("stop-loss price overflowed".into()))
            }
        }
    }
}

/// Static levels used when market data is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDefaults {
    pub fallback_entry_price: Decimal,
    pub fallback_stop_price: Decimal,
    /// Stop as a fraction of the current price when the week low is not used
    pub stop_below_price_ratio: Decimal,
}

impl Default for LevelDefaults {
    fn default() -> Self {
        Self {
            fallback_entry_price: dec!(100),
            fallback_stop_price: dec!(95),
            stop_below_price_ratio: dec!(0.95),
        }
    }
}

/// Entry and stop levels suggested before the user overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedLevels {
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    /// Whether the levels came from market data rather than static fallbacks
    pub from_market: bool,
}

impl SuggestedLevels {
    /// Levels for a price-based stop.
    ///
    /// The stop is the week low, or the current price scaled by
    /// `stop_below_price_ratio` when `use_week_low` is off.
    pub fn price_stop(quote: &PriceQuote, use_week_low: bool, defaults: &LevelDefaults) -> Self {
        match *quote {
            PriceQuote::Available {
                current_price,
                week_low,
            } => {
                let stop_loss_price = if use_week_low {
                    week_low
                } else {
                    current_price * defaults.stop_below_price_ratio
                };
                Self {
                    entry_price: current_price,
                    stop_loss_price,
                    from_market: true,
                }
            }
            PriceQuote::Unavailable => Self {
                entry_price: defaults.fallback_entry_price,
                stop_loss_price: defaults.fallback_stop_price,
                from_market: false,
            },
        }
    }

    /// Suggested entry for a percentage-based stop.
    pub fn entry_price(quote: &PriceQuote, defaults: &LevelDefaults) -> Decimal {
        quote
            .current_price()
            .unwrap_or(defaults.fallback_entry_price)
    }
}

//! Risk-based position sizing.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sizer_core::error::SizingError;
use sizer_core::types::{PositionRequest, PositionResult};
use tracing::debug;

use crate::stop_loss::StopLossRule;

/// Size a position whose stop-loss is given as an absolute price.
///
/// A zero risk amount always yields an empty result, even when the stop sits
/// above the entry. Otherwise the stop must be strictly below the entry.
pub fn compute_fixed_stop(req: &PositionRequest) -> Result<PositionResult, SizingError> {
    non_negative("portfolio_size", req.portfolio_size)?;
    percentage("risk_percentage", req.risk_percentage)?;
    non_negative("entry_price", req.entry_price)?;
    non_negative("stop_loss_price", req.stop_loss_price)?;

    let risk_amount = req
        .portfolio_size
        .checked_mul(req.risk_percentage / Decimal::ONE_HUNDRED)
        .ok_or_else(|| overflow("risk amount"))?;
    let risk_per_share = req.entry_price - req.stop_loss_price;

    if risk_amount.is_zero() {
        return Ok(PositionResult::empty(risk_per_share));
    }

    if risk_per_share <= Decimal::ZERO {
        return Err(SizingError::InvalidRiskConfiguration {
            entry_price: req.entry_price,
            stop_loss_price: req.stop_loss_price,
            risk_per_share,
        });
    }

    // Truncate to whole shares
    let shares = risk_amount
        .checked_div(risk_per_share)
        .ok_or_else(|| overflow("share count"))?
        .trunc()
        .to_u64()
        .ok_or_else(|| overflow("share count"))?;

    let position_size = Decimal::from(shares)
        .checked_mul(req.entry_price)
        .ok_or_else(|| overflow("position size"))?;

    debug!(
        %risk_amount,
        %risk_per_share,
        shares,
        %position_size,
        "Sized position"
    );

    Ok(PositionResult {
        risk_amount,
        risk_per_share,
        shares,
        position_size,
    })
}

/// Size a position whose stop-loss is a percentage below the entry.
pub fn compute_percent_stop(
    portfolio_size: Decimal,
    risk_percentage: Decimal,
    entry_price: Decimal,
    stop_loss_percentage: Decimal,
) -> Result<PositionResult, SizingError> {
    let rule = StopLossRule::PercentBelowEntry {
        percent: stop_loss_percentage,
    };
    let stop_loss_price = rule.stop_price(entry_price)?;

    compute_fixed_stop(&PositionRequest::new(
        portfolio_size,
        risk_percentage,
        entry_price,
        stop_loss_price,
    ))
}

/// Position sizer bound to a stop-loss rule.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    stop_loss: StopLossRule,
}

impl PositionSizer {
    /// Create a new position sizer.
    pub fn new(stop_loss: StopLossRule) -> Self {
        Self { stop_loss }
    }

    pub fn stop_loss(&self) -> &StopLossRule {
        &self.stop_loss
    }

    /// Calculate position size.
    pub fn calculate(
        &self,
        portfolio_size: Decimal,
        risk_percentage: Decimal,
        entry_price: Decimal,
    ) -> Result<PositionResult, SizingError> {
        match self.stop_loss {
            StopLossRule::Price { price } => compute_fixed_stop(&PositionRequest::new(
                portfolio_size,
                risk_percentage,
                entry_price,
                price,
            )),
            StopLossRule::PercentBelowEntry { percent } => {
                compute_percent_stop(portfolio_size, risk_percentage, entry_price, percent)
            }
        }
    }
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<(), SizingError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SizingError::InvalidInput {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

pub(crate) fn percentage(field: &'static str, value: Decimal) -> Result<(), SizingError> {
    non_negative(field, value)?;
    if value > Decimal::ONE_HUNDRED {
        return Err(SizingError::InvalidInput {
            field,
            value,
            reason: "must not exceed 100",
        });
    }
    Ok(())
}

fn overflow(what: &str) -> SizingError {
    SizingError::Arithmetic(format!("{} overflowed", what))
}

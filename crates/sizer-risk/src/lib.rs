//! Risk management for a single long position.
//!
//! Provides risk-based position sizing and stop-loss derivation.

mod position_sizer;
mod stop_loss;

pub use position_sizer::{compute_fixed_stop, compute_percent_stop, PositionSizer};
pub use stop_loss::{LevelDefaults, StopLossRule, SuggestedLevels};

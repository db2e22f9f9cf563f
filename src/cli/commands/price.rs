//! Price-based stop-loss command.

use anyhow::Result;
use sizer_config::AppConfig;
use sizer_monitor::{SizingReport, StopLossInput};
use sizer_risk::{PositionSizer, StopLossRule, SuggestedLevels};
use tracing::info;

use super::{emit, fetch_quote, sizing_failed};
use crate::cli::{OutputFormat, PriceArgs};

pub async fn run(args: PriceArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let defaults = &config.defaults;
    let use_week_low = args.use_week_low(defaults.use_week_low);
    let symbol = args.sizing.symbol.unwrap_or_else(|| defaults.symbol.clone());
    let portfolio_size = args.sizing.portfolio.unwrap_or(defaults.portfolio_size);
    let risk_percentage = args.sizing.risk.unwrap_or(defaults.risk_percent);

    let quote = fetch_quote(config, &symbol, args.sizing.offline).await?;
    let levels = SuggestedLevels::price_stop(&quote, use_week_low, &config.fallback);

    let entry_price = args.sizing.entry.unwrap_or(levels.entry_price);
    let stop_loss_price = args.stop.unwrap_or(levels.stop_loss_price);

    let sizer = PositionSizer::new(StopLossRule::Price {
        price: stop_loss_price,
    });
    let result = sizer
        .calculate(portfolio_size, risk_percentage, entry_price)
        .map_err(sizing_failed)?;

    info!(
        %symbol,
        shares = result.shares,
        position_size = %result.position_size,
        "Position sized"
    );

    emit(
        &SizingReport {
            symbol,
            portfolio_size,
            risk_percentage,
            entry_price,
            stop_loss: StopLossInput::Price,
            stop_loss_price,
            market_data: levels.from_market,
            result,
        },
        output,
    )
}

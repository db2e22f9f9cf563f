//! Percentage-based stop-loss command.

use anyhow::Result;
use sizer_config::AppConfig;
use sizer_monitor::{SizingReport, StopLossInput};
use sizer_risk::{PositionSizer, StopLossRule, SuggestedLevels};
use tracing::info;

use super::{emit, fetch_quote, sizing_failed};
use crate::cli::{OutputFormat, PercentArgs};

pub async fn run(args: PercentArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let defaults = &config.defaults;
    let symbol = args.sizing.symbol.unwrap_or_else(|| defaults.symbol.clone());
    let portfolio_size = args.sizing.portfolio.unwrap_or(defaults.portfolio_size);
    let risk_percentage = args.sizing.risk.unwrap_or(defaults.risk_percent);
    let stop_loss_percentage = args.stop_percent.unwrap_or(defaults.stop_loss_percent);

    let quote = fetch_quote(config, &symbol, args.sizing.offline).await?;
    let entry_price = args
        .sizing
        .entry
        .unwrap_or_else(|| SuggestedLevels::entry_price(&quote, &config.fallback));

    let sizer = PositionSizer::new(StopLossRule::PercentBelowEntry {
        percent: stop_loss_percentage,
    });
    let result = sizer
        .calculate(portfolio_size, risk_percentage, entry_price)
        .map_err(sizing_failed)?;
    let stop_loss_price = sizer
        .stop_loss()
        .stop_price(entry_price)
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
            stop_loss: StopLossInput::Percent {
                percent: stop_loss_percentage,
            },
            stop_loss_price,
            market_data: quote.is_available(),
            result,
        },
        output,
    )
}

//! CLI command implementations.

pub mod percent;
pub mod price;
pub mod quote;
pub mod validate;

use anyhow::{anyhow, Context, Result};
use sizer_config::{AppConfig, ProviderKind};
use sizer_core::error::SizingError;
use sizer_core::types::PriceQuote;
use sizer_data::{CsvProvider, MarketDataLookup, YahooConfig, YahooProvider};
use sizer_monitor::SizingReport;
use tracing::info;

use crate::cli::OutputFormat;

/// Build the market data lookup selected in the configuration.
pub fn build_lookup(config: &AppConfig) -> Result<MarketDataLookup> {
    let settings = &config.market_data;
    let lookup = match settings.provider {
        ProviderKind::Yahoo => {
            let mut yahoo = YahooConfig {
                base_url: settings.base_url.clone(),
                timeout: settings.timeout(),
                ..YahooConfig::default()
            };
            if let Some(agent) = &settings.user_agent {
                yahoo.user_agent = agent.clone();
            }
            let provider = YahooProvider::new(yahoo).context("Failed to create Yahoo Finance client")?;
            MarketDataLookup::new(Box::new(provider))
        }
        ProviderKind::Csv => MarketDataLookup::new(Box::new(CsvProvider::new(&settings.csv_dir))),
    };

    Ok(lookup
        .with_timeout(settings.timeout())
        .with_lookback_days(settings.lookback_days))
}

/// Fetch defaults for a symbol unless running offline.
pub async fn fetch_quote(config: &AppConfig, symbol: &str, offline: bool) -> Result<PriceQuote> {
    if offline {
        return Ok(PriceQuote::Unavailable);
    }
    let lookup = build_lookup(config)?;
    info!(symbol, provider = lookup.provider_name(), "Looking up market data");
    Ok(lookup.lookup(symbol).await)
}

/// Print a report in the requested format.
pub fn emit(report: &SizingReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }
    Ok(())
}

/// Turn a sizing error into a message the user can act on.
pub fn sizing_failed(err: SizingError) -> anyhow::Error {
    match err {
        SizingError::InvalidRiskConfiguration { .. } => {
            anyhow!("{err}. Move the stop-loss below the entry price.")
        }
        other => anyhow::Error::new(other).context("Cannot size position"),
    }
}

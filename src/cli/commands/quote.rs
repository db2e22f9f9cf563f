//! Market data lookup command.

use anyhow::Result;
use sizer_config::AppConfig;
use sizer_core::types::PriceQuote;
use sizer_monitor::format_currency;

use super::build_lookup;
use crate::cli::{OutputFormat, QuoteArgs};

pub async fn run(args: QuoteArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let symbol = args.symbol.unwrap_or_else(|| config.defaults.symbol.clone());
    let lookup = build_lookup(config)?;

    let outcome = lookup.try_lookup(&symbol).await;

    if let OutputFormat::Json = output {
        let quote = outcome.clone().unwrap_or(PriceQuote::Unavailable);
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    println!("Symbol:    {}", symbol);
    println!("Provider:  {}", lookup.provider_name());
    match outcome {
        Ok(PriceQuote::Available {
            current_price,
            week_low,
        }) => {
            println!("Price:     {}", format_currency(current_price));
            println!("Week Low:  {}", format_currency(week_low));
        }
        Ok(PriceQuote::Unavailable) => println!("Market data unavailable"),
        Err(e) => println!("Market data unavailable: {}", e),
    }

    Ok(())
}

//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sizer")]
#[command(author, version, about = "Risk-based position size calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size a position with the stop-loss given as a price
    Price(PriceArgs),
    /// Size a position with the stop-loss given as a percentage below entry
    Percent(PercentArgs),
    /// Show the latest price and trailing week low for a symbol
    Quote(QuoteArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Inputs shared by both calculators.
#[derive(clap::Args)]
pub struct SizingArgs {
    /// Stock symbol used to pre-fill entry and stop
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Portfolio size in dollars
    #[arg(short, long)]
    pub portfolio: Option<Decimal>,

    /// Percentage of the portfolio to risk
    #[arg(short, long)]
    pub risk: Option<Decimal>,

    /// Entry price (defaults to the latest market price)
    #[arg(short, long)]
    pub entry: Option<Decimal>,

    /// Skip the market data lookup
    #[arg(long)]
    pub offline: bool,
}

#[derive(clap::Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub sizing: SizingArgs,

    /// Stop-loss price (defaults to the week low)
    #[arg(long)]
    pub stop: Option<Decimal>,

    /// Default the stop to the week low, overriding the configuration
    #[arg(long, conflicts_with = "no_week_low")]
    pub week_low: bool,

    /// Default the stop to a fixed fraction of the price instead of the week low
    #[arg(long)]
    pub no_week_low: bool,
}

impl PriceArgs {
    /// Whether the suggested stop is the week low, given the configured default.
    pub fn use_week_low(&self, configured: bool) -> bool {
        if self.week_low {
            true
        } else if self.no_week_low {
            false
        } else {
            configured
        }
    }
}

#[derive(clap::Args)]
pub struct PercentArgs {
    #[command(flatten)]
    pub sizing: SizingArgs,

    /// Stop-loss percentage below entry
    #[arg(long)]
    pub stop_percent: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct QuoteArgs {
    /// Stock symbol
    #[arg(short, long)]
    pub symbol: Option<String>,
}

//! Configuration structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sizer_risk::LevelDefaults;
use std::path::PathBuf;
use std::time::Duration;

use crate::SettingsError;

/// Ten years of calendar days.
const MAX_LOOKBACK_DAYS: u32 = 3650;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub defaults: CalculatorDefaults,
    #[serde(default)]
    pub fallback: LevelDefaults,
}

impl AppConfig {
    /// Reject settings the calculator cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let d = &self.defaults;
        if d.portfolio_size < Decimal::ZERO {
            return Err(invalid("defaults.portfolio_size", "must not be negative"));
        }
        if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&d.risk_percent) {
            return Err(invalid("defaults.risk_percent", "must be between 0 and 100"));
        }
        if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&d.stop_loss_percent) {
            return Err(invalid("defaults.stop_loss_percent", "must be between 0 and 100"));
        }

        let m = &self.market_data;
        if m.timeout_secs == 0 {
            return Err(invalid("market_data.timeout_secs", "must be at least 1"));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&m.lookback_days) {
            return Err(invalid(
                "market_data.lookback_days",
                "must be between 1 and 3650",
            ));
        }

        let f = &self.fallback;
        if f.fallback_stop_price < Decimal::ZERO || f.fallback_stop_price >= f.fallback_entry_price {
            return Err(invalid(
                "fallback.fallback_stop_price",
                "must be below fallback_entry_price and not negative",
            ));
        }
        if f.stop_below_price_ratio <= Decimal::ZERO || f.stop_below_price_ratio >= Decimal::ONE {
            return Err(invalid("fallback.stop_below_price_ratio", "must be between 0 and 1"));
        }

        Ok(())
    }
}

fn invalid(key: &'static str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        key,
        reason: reason.to_string(),
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "position-sizer".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Market data backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Csv,
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    pub provider: ProviderKind,
    pub base_url: String,
    pub timeout_secs: u64,
    pub lookback_days: u32,
    pub user_agent: Option<String>,
    pub csv_dir: PathBuf,
}

impl MarketDataSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            lookback_days: 7,
            user_agent: None,
            csv_dir: PathBuf::from("data"),
        }
    }
}

/// Form defaults for a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    pub symbol: String,
    pub portfolio_size: Decimal,
    pub risk_percent: Decimal,
    pub stop_loss_percent: Decimal,
    pub use_week_low: bool,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            portfolio_size: dec!(10000),
            risk_percent: dec!(1),
            stop_loss_percent: dec!(2),
            use_week_low: true,
        }
    }
}

//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CalculatorDefaults, LoggingConfig, MarketDataSettings, ProviderKind,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Load configuration from an optional file and the environment.
///
/// Environment variables use the `SIZER` prefix with `__` between keys,
/// e.g. `SIZER__DEFAULTS__RISK_PERCENT=0.5`.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("SIZER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

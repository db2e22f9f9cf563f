//! Logging setup and calculation reports.

mod logging;
mod report;

pub use logging::{setup_logging, LogGuard};
pub use report::{format_currency, format_percent, SizingReport, StopLossInput};

//! CSV file market data provider.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use sizer_core::error::DataError;
use sizer_core::traits::MarketDataProvider;
use sizer_core::types::DailyBar;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open")]
    open: String,
    #[serde(alias = "High")]
    high: String,
    #[serde(alias = "Low")]
    low: String,
    #[serde(alias = "Close")]
    close: String,
    #[serde(alias = "Volume", default)]
    volume: Option<String>,
}

/// Daily bars read from `{dir}/{SYMBOL}.csv`.
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    /// Create a provider over a directory of per-symbol CSV files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Find the file for a symbol.
    fn path_for(&self, symbol: &str) -> Result<PathBuf, DataError> {
        let lower = symbol.to_lowercase();
        let candidates = [
            self.dir.join(format!("{}.csv", symbol)),
            self.dir.join(format!("{}.csv", lower)),
            self.dir.join(format!("{}_daily.csv", symbol)),
            self.dir.join(format!("{}_daily.csv", lower)),
        ];

        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    /// Load all bars for a symbol, oldest first.
    pub fn load_bars(&self, symbol: &str) -> Result<Vec<DailyBar>, DataError> {
        let path = self.path_for(symbol)?;
        load_from_path(&path)
    }
}

fn load_from_path(path: &Path) -> Result<Vec<DailyBar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut bars = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        bars.push(DailyBar::new(
            parse_date(&record.date)?,
            parse_decimal("open", &record.open)?,
            parse_decimal("high", &record.high)?,
            parse_decimal("low", &record.low)?,
            parse_decimal("close", &record.close)?,
            match record.volume.as_deref() {
                Some(v) if !v.is_empty() => parse_decimal("volume", v)?,
                _ => Decimal::ZERO,
            },
        ));
    }

    bars.sort_by_key(|b| b.date);

    Ok(bars)
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| DataError::ParseError(format!("Invalid {}: {}", field, value)))
}

/// Parse various date formats.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    // Unix timestamp, milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let millis = if ts > 10_000_000_000 { ts } else { ts * 1000 };
        if let Some(dt) = DateTime::from_timestamp_millis(millis) {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl MarketDataProvider for CsvProvider {
    async fn latest_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        self.load_bars(symbol)?
            .last()
            .map(|b| b.close)
            .ok_or(DataError::NoDataAvailable)
    }

    async fn daily_lows(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Decimal>, DataError> {
        let (start, end) = (start.date_naive(), end.date_naive());
        let lows: Vec<Decimal> = self
            .load_bars(symbol)?
            .iter()
            .filter(|b| b.within(start, end))
            .map(|b| b.low)
            .collect();

        if lows.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(lows)
    }

    fn name(&self) -> &str {
        "CSV"
    }
}

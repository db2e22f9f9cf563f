//! Sizing report generation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sizer_core::types::PositionResult;

/// How the stop-loss was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StopLossInput {
    Price,
    Percent { percent: Decimal },
}

/// Complete sizing report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingReport {
    pub symbol: String,
    pub portfolio_size: Decimal,
    pub risk_percentage: Decimal,
    pub entry_price: Decimal,
    pub stop_loss: StopLossInput,
    pub stop_loss_price: Decimal,
    /// Whether entry/stop defaults came from market data
    pub market_data: bool,
    pub result: PositionResult,
}

impl SizingReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   POSITION SIZE REPORT                     \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("INPUTS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Symbol:              {}\n", self.symbol));
        s.push_str(&format!(
            "  Portfolio Size:      {}\n",
            format_currency(self.portfolio_size)
        ));
        s.push_str(&format!(
            "  Risk Amount:         {}\n",
            format_currency(self.result.risk_amount)
        ));
        s.push_str(&format!(
            "  Entry Price:         {}\n",
            format_currency(self.entry_price)
        ));
        match self.stop_loss {
            StopLossInput::Price => {
                s.push_str(&format!(
                    "  Stop Loss:           {}\n",
                    format_currency(self.stop_loss_price)
                ));
            }
            StopLossInput::Percent { percent } => {
                s.push_str(&format!(
                    "  Stop Loss (%):       {}\n",
                    format_percent(percent)
                ));
                s.push_str(&format!(
                    "  Stop Loss Price:     {}\n",
                    format_currency(self.stop_loss_price)
                ));
            }
        }
        if !self.market_data {
            s.push_str("  (market data unavailable, using manual levels)\n");
        }
        s.push('\n');

        s.push_str("RESULTS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Risk Per Share:      {}\n",
            format_currency(self.result.risk_per_share)
        ));
        s.push_str(&format!("  Shares:              {}\n", self.result.shares));
        s.push_str(&format!(
            "  Position Size:       {}\n",
            format_currency(self.result.position_size)
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Format a dollar amount as `$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}

/// Format a percentage as `2.00%`.
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.2}%",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn report(stop_loss: StopLossInput) -> SizingReport {
        SizingReport {
            symbol: "AAPL".to_string(),
            portfolio_size: dec!(10000),
            risk_percentage: dec!(1),
            entry_price: dec!(100),
            stop_loss,
            stop_loss_price: dec!(98),
            market_data: true,
            result: PositionResult {
                risk_amount: dec!(100),
                risk_per_share: dec!(2),
                shares: 50,
                position_size: dec!(5000),
            },
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(95)), "$95.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(100000)), "$100,000.00");
        assert_eq!(format_currency(dec!(-5)), "-$5.00");
        assert_eq!(format_currency(dec!(0.125)), "$0.13");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(2)), "2.00%");
        assert_eq!(format_percent(dec!(0.125)), "0.13%");
    }

    #[test]
    fn test_percent_summary() {
        let summary = report(StopLossInput::Percent { percent: dec!(2) }).summary();

        assert!(summary.contains("Portfolio Size:      $10,000.00"));
        assert!(summary.contains("Stop Loss (%):       2.00%"));
        assert!(summary.contains("Stop Loss Price:     $98.00"));
        assert!(summary.contains("Shares:              50"));
        assert!(summary.contains("Position Size:       $5,000.00"));
        assert!(!summary.contains("market data unavailable"));
    }

    #[test]
    fn test_price_summary_without_market_data() {
        let mut report = report(StopLossInput::Price);
        report.market_data = false;
        let summary = report.summary();

        assert!(summary.contains("Stop Loss:           $98.00"));
        assert!(!summary.contains("Stop Loss (%)"));
        assert!(summary.contains("market data unavailable"));
    }

    #[test]
    fn test_json_export() {
        let json = report(StopLossInput::Price).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["result"]["shares"], 50);
        assert_eq!(value["stop_loss"]["mode"], "price");
    }
}

//! Yahoo Finance chart API provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use sizer_core::error::DataError;
use sizer_core::traits::MarketDataProvider;
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance client configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("position-sizer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    low: Vec<Option<Decimal>>,
}

/// Market data from the Yahoo Finance chart endpoint.
pub struct YahooProvider {
    config: YahooConfig,
    client: Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Chart endpoint for a symbol, with the symbol percent-encoded as one path segment.
    fn chart_url(&self, symbol: &str) -> Result<Url, DataError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| DataError::ConnectionError(format!("Invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| {
                DataError::ConnectionError(format!("Invalid base URL: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);

        Ok(url)
    }

    async fn get_chart(&self, symbol: &str, params: &[(&str, String)]) -> Result<ChartResult, DataError> {
        let url = self.chart_url(symbol)?;
        debug!(%url, ?params, "Requesting chart");

        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(DataError::ConnectionError(format!("{}: {}", status, text)));
        }

        let data: ChartResponse =
            serde_json::from_str(&text).map_err(|e| DataError::ParseError(e.to_string()))?;

        if let Some(err) = data.chart.error {
            debug!(code = %err.code, description = %err.description, "Chart error");
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }

        data.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn latest_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        let params = [("range", "1d".to_string()), ("interval", "1d".to_string())];
        let chart = self.get_chart(symbol, &params).await?;

        chart
            .meta
            .regular_market_price
            .ok_or_else(|| DataError::InvalidData("missing regularMarketPrice".into()))
    }

    async fn daily_lows(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Decimal>, DataError> {
        let params = [
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", "1d".to_string()),
        ];
        let chart = self.get_chart(symbol, &params).await?;

        // Sessions without trades report null lows
        let lows: Vec<Decimal> = chart
            .indicators
            .into_iter()
            .flat_map(|i| i.quote.into_iter().next())
            .flat_map(|q| q.low.into_iter().flatten())
            .collect();

        if lows.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(lows)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarketDataLookup;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use sizer_core::types::PriceQuote;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> YahooProvider {
        YahooProvider::new(YahooConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(2),
            ..YahooConfig::default()
        })
        .unwrap()
    }

    fn price_body(price: f64) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "AAPL", "currency": "USD", "regularMarketPrice": price },
                    "timestamp": [1718025000],
                    "indicators": { "quote": [{ "low": [price - 1.0] }] }
                }],
                "error": null
            }
        })
    }

    fn history_body() -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "AAPL", "regularMarketPrice": 212.49 },
                    "timestamp": [1717767000, 1718025000, 1718111400, 1718197800, 1718284200],
                    "indicators": {
                        "quote": [{
                            "open": [194.65, 193.65, 193.46, 207.37, 214.74],
                            "high": [196.94, 197.3, 207.16, 220.2, 216.75],
                            "low": [194.14, 192.15, null, 206.9, 211.6],
                            "close": [196.89, 193.12, 207.15, 213.07, 214.24]
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[tokio::test]
    async fn test_latest_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("range", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(price_body(212.49)))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert_eq!(provider.latest_price("AAPL").await.unwrap(), dec!(212.49));
    }

    #[tokio::test]
    async fn test_daily_lows_skip_nulls() {
        let server = MockServer::start().await;
        let start = Utc.with_ymd_and_hms(2024, 6, 7, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap();

        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("period1", start.timestamp().to_string()))
            .and(query_param("period2", end.timestamp().to_string()))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let lows = provider.daily_lows("AAPL", start, end).await.unwrap();

        assert_eq!(lows, vec![dec!(194.14), dec!(192.15), dec!(206.9), dec!(211.6)]);
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
                }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.latest_price("NOPE").await.unwrap_err();
        assert_eq!(err, DataError::SymbolNotFound("NOPE".into()));
    }

    #[tokio::test]
    async fn test_chart_error_in_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": { "result": null, "error": { "code": "Bad Request", "description": "Invalid input" } }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.latest_price("???").await,
            Err(DataError::SymbolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_price_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": { "result": [{ "meta": { "symbol": "AAPL" } }], "error": null }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.latest_price("AAPL").await,
            Err(DataError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.latest_price("AAPL").await,
            Err(DataError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.latest_price("AAPL").await,
            Err(DataError::ConnectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("range", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(price_body(212.49)))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
            .mount(&server)
            .await;

        let lookup = MarketDataLookup::new(Box::new(provider_for(&server)));
        let quote = lookup.lookup("AAPL").await;

        assert_eq!(quote, PriceQuote::available(dec!(212.49), dec!(192.15)));
    }

    #[tokio::test]
    async fn test_lookup_network_failure() {
        // Nothing listens on the discard port
        let provider = YahooProvider::new(YahooConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            ..YahooConfig::default()
        })
        .unwrap();

        let lookup = MarketDataLookup::new(Box::new(provider));
        assert_eq!(lookup.lookup("AAPL").await, PriceQuote::Unavailable);
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let provider = YahooProvider::new(YahooConfig {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..YahooConfig::default()
        })
        .unwrap();

        assert_eq!(
            provider.chart_url("BRK.B").unwrap().as_str(),
            "http://127.0.0.1:8080/v8/finance/chart/BRK.B"
        );
        assert_eq!(
            provider.chart_url("NOPE/../AAPL").unwrap().as_str(),
            "http://127.0.0.1:8080/v8/finance/chart/NOPE%2F..%2FAAPL"
        );
        assert!(provider.chart_url("AAPL?junk").unwrap().query().is_none());
        assert!(provider.chart_url("AAPL#x").unwrap().fragment().is_none());
    }

    #[tokio::test]
    async fn test_malformed_symbol_does_not_reach_other_ticker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(price_body(212.49)))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        for symbol in ["NOPE/../AAPL", "AAPL?junk", "AAPL#x"] {
            assert!(
                provider.latest_price(symbol).await.is_err(),
                "{symbol} resolved to a quote"
            );
        }

        let lookup = MarketDataLookup::new(Box::new(provider));
        assert_eq!(lookup.lookup("NOPE/../AAPL").await, PriceQuote::Unavailable);
    }
}

//! REST client for the aggregates (OHLC bars) endpoint.
//!
//! [`BarSource`] is the seam between the screen and the network: the TUI
//! drives any source, [`BarsClient`] is the HTTP implementation.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::Result;
use crate::config::ApiConfig;
use crate::models::{Bar, BarsResponse, Timeframe};

/// Upper bound on one bars request, connect included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Anything that can produce the bar sequence for a timeframe.
///
/// Implementations must return bars newest first.
pub trait BarSource: Send + Sync + 'static {
    /// Fetches the full bar sequence for `timeframe`.
    fn fetch_bars(&self, timeframe: Timeframe) -> impl Future<Output = Result<Vec<Bar>>> + Send;
}

/// HTTP client for `GET aggs/ticker/{symbol}/range/{timeframe}/{start}/{end}`.
#[derive(Debug, Clone)]
pub struct BarsClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl BarsClient {
    /// Builds a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Http`](crate::ChartError::Http) if the HTTP
    /// client cannot be constructed (e.g. TLS backend initialisation fails).
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Request URL for `timeframe`, without query parameters.
    pub fn bars_url(&self, timeframe: Timeframe) -> String {
        format!(
            "{}aggs/ticker/{}/range/{}/{}/{}",
            self.config.base_url,
            self.config.symbol,
            timeframe.as_path(),
            self.config.range_start.format("%Y-%m-%d"),
            self.config.range_end.format("%Y-%m-%d"),
        )
    }

    /// Symbol the client is configured for.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }
}

impl BarSource for BarsClient {
    async fn fetch_bars(&self, timeframe: Timeframe) -> Result<Vec<Bar>> {
        // The key travels in the query string; errors below drop the URL so it
        // never reaches the screen or the log.
        let url = self.bars_url(timeframe);
        debug!(%url, "requesting bars");

        let limit = self.config.limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("adjusted", "true"),
                ("sort", "desc"),
                ("limit", limit.as_str()),
                ("apiKey", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<BarsResponse>(&body)
                .ok()
                .and_then(|r| r.error_message())
                .unwrap_or_else(|| status.to_string());
            warn!(%status, timeframe = %timeframe, "bars request rejected");
            return Err(crate::ChartError::Api(detail));
        }

        let bars = parse_bars(&body)?;
        info!(timeframe = %timeframe, bars = bars.len(), "loaded bars");
        Ok(bars)
    }
}

/// Parses an aggregates response body into a newest-first bar sequence.
///
/// Ascending input is reversed so callers can rely on index 0 being the
/// newest bar.
///
/// # Errors
///
/// Returns [`ChartError::Json`](crate::ChartError::Json) for a malformed body
/// and [`ChartError::Api`](crate::ChartError::Api) when the payload reports
/// an error.
pub fn parse_bars(body: &str) -> Result<Vec<Bar>> {
    let response: BarsResponse = serde_json::from_str(body)?;
    if let Some(message) = response.error_message() {
        return Err(crate::ChartError::Api(message));
    }

    let mut bars = response.bars;
    if let (Some(first), Some(last)) = (bars.first(), bars.last())
        && first.time < last.time
    {
        bars.reverse();
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use zeroize::Zeroizing;

    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "https://api.example.com/v2/".to_string(),
            api_key: Zeroizing::new("secret".to_string()),
            symbol: "AAPL".to_string(),
            range_start: NaiveDate::from_ymd_opt(2022, 1, 9).unwrap(),
            range_end: NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            limit: 50_000,
        }
    }

    #[test]
    fn url_contains_timeframe_path_and_range() {
        let client = BarsClient::new(config()).unwrap();
        assert_eq!(
            client.bars_url(Timeframe::M30),
            "https://api.example.com/v2/aggs/ticker/AAPL/range/30/minute/2022-01-09/2023-01-09"
        );
    }

    #[test]
    fn url_never_contains_api_key() {
        let client = BarsClient::new(config()).unwrap();
        assert!(!client.bars_url(Timeframe::H1).contains("secret"));
    }

    #[test]
    fn parse_keeps_descending_order() {
        let body = r#"{"results":[
            {"o":2.0,"c":2.5,"l":1.5,"h":3.0,"t":2000},
            {"o":1.0,"c":1.5,"l":0.5,"h":2.0,"t":1000}
        ]}"#;
        let bars = parse_bars(body).unwrap();
        assert_eq!(bars[0].time, 2000);
    }

    #[test]
    fn parse_reverses_ascending_order() {
        let body = r#"{"bars":[
            {"o":1.0,"c":1.5,"l":0.5,"h":2.0,"t":1000},
            {"o":2.0,"c":2.5,"l":1.5,"h":3.0,"t":2000}
        ]}"#;
        let bars = parse_bars(body).unwrap();
        assert_eq!(bars.iter().map(|b| b.time).collect::<Vec<_>>(), [2000, 1000]);
    }

    #[test]
    fn parse_surfaces_api_error() {
        let err = parse_bars(r#"{"status":"ERROR","error":"Unknown API Key"}"#).unwrap_err();
        assert!(matches!(err, crate::ChartError::Api(ref m) if m == "Unknown API Key"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_bars("<html>"),
            Err(crate::ChartError::Json(_))
        ));
    }
}

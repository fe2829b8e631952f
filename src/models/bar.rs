//! OHLC bar models.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// A single OHLC price record for one time bucket.
///
/// Well-formed input satisfies `low <= open, close <= high`; this is assumed,
/// not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "h")]
    pub high: f64,
    /// Bucket start, epoch milliseconds.
    #[serde(rename = "t")]
    pub time: i64,
}

impl Bar {
    /// Returns `true` when the bar closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Calendar breakdown of the bar's timestamp in the given offset.
    ///
    /// Returns `None` for timestamps chrono cannot represent.
    pub fn datetime(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        offset.timestamp_millis_opt(self.time).single()
    }
}

/// Response envelope of `GET /aggs/ticker/{symbol}/range/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct BarsResponse {
    /// `OK`, `DELAYED` or `ERROR`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(rename = "resultsCount", default)]
    pub results_count: Option<u64>,
    /// Bars, newest first when requested with `sort=desc`.
    #[serde(rename = "results", alias = "bars", default)]
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BarsResponse {
    /// Returns the API's error text if the payload reports a failure.
    pub fn error_message(&self) -> Option<String> {
        let failed = self
            .status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("ERROR"));
        if !failed && self.error.is_none() {
            return None;
        }
        Some(
            self.error
                .clone()
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| "unknown error".to_string()),
        )
    }
}

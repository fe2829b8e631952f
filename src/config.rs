//! Application configuration loaded from environment variables.
//!
//! The API key **must** be provided, either directly or via the keychain
//! (see [`crate::credentials`]):
//! - `CANDLETERM_API_KEY`: key for the aggregates endpoint
//!
//! Optional overrides:
//! - `CANDLETERM_BASE_URL`: API root, default `https://api.polygon.io/v2/`
//! - `CANDLETERM_SYMBOL`: ticker, default `AAPL`
//! - `CANDLETERM_RANGE_START` / `CANDLETERM_RANGE_END`: `YYYY-MM-DD`
//! - `CANDLETERM_LIMIT`: max bars per request, default `50000`
//! - `CANDLETERM_UTC_OFFSET_MINUTES`: offset for time-axis bucketing
//! - `CANDLETERM_STATE_FILE`: enables viewport persistence
//! - `CANDLETERM_LOG_FILE`: enables log output

use std::fmt;
use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use zeroize::Zeroizing;

/// Default aggregates API root.
const DEFAULT_BASE_URL: &str = "https://api.polygon.io/v2/";

const DEFAULT_SYMBOL: &str = "AAPL";
const DEFAULT_RANGE_START: &str = "2022-01-09";
const DEFAULT_RANGE_END: &str = "2023-01-09";
const DEFAULT_LIMIT: u32 = 50_000;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub chart: ChartConfig,
}

/// Market-data endpoint configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// API root; always ends with `/`.
    pub base_url: String,
    pub api_key: Zeroizing<String>,
    pub symbol: String,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub limit: u32,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("symbol", &self.symbol)
            .field("range_start", &self.range_start)
            .field("range_end", &self.range_end)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Presentation and persistence settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Offset used to bucket bars into hours and days.
    pub utc_offset: FixedOffset,
    pub state_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ChartError::Config`](crate::ChartError::Config) if the API key
/// is missing or any override cannot be parsed.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_key = non_empty_var("CANDLETERM_API_KEY").ok_or_else(|| {
        crate::ChartError::Config(
            "CANDLETERM_API_KEY is not set (export it or run `candleterm --store-key <KEY>`)"
                .to_string(),
        )
    })?;

    let mut base_url =
        non_empty_var("CANDLETERM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if !base_url.ends_with('/') {
        base_url.push('/');
    }

    let symbol = non_empty_var("CANDLETERM_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let range_start = parse_date("CANDLETERM_RANGE_START", DEFAULT_RANGE_START)?;
    let range_end = parse_date("CANDLETERM_RANGE_END", DEFAULT_RANGE_END)?;
    if range_end < range_start {
        return Err(crate::ChartError::Config(format!(
            "CANDLETERM_RANGE_END ({range_end}) is before CANDLETERM_RANGE_START ({range_start})"
        )));
    }

    let limit = match non_empty_var("CANDLETERM_LIMIT") {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| {
                crate::ChartError::Config(format!(
                    "CANDLETERM_LIMIT must be a positive integer, got {raw:?}"
                ))
            })?,
        None => DEFAULT_LIMIT,
    };

    let utc_offset = match non_empty_var("CANDLETERM_UTC_OFFSET_MINUTES") {
        Some(raw) => raw
            .parse::<i32>()
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                crate::ChartError::Config(format!(
                    "CANDLETERM_UTC_OFFSET_MINUTES must be minutes within ±24h, got {raw:?}"
                ))
            })?,
        None => Utc.fix(),
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            api_key: Zeroizing::new(api_key),
            symbol,
            range_start,
            range_end,
            limit,
        },
        chart: ChartConfig {
            utc_offset,
            state_file: non_empty_var("CANDLETERM_STATE_FILE").map(PathBuf::from),
            log_file: non_empty_var("CANDLETERM_LOG_FILE").map(PathBuf::from),
        },
    })
}

/// Parses a `YYYY-MM-DD` variable, falling back to `default` when unset.
fn parse_date(name: &str, default: &str) -> crate::Result<NaiveDate> {
    let raw = non_empty_var(name).unwrap_or_else(|| default.to_string());
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
        crate::ChartError::Config(format!("{name} must be a YYYY-MM-DD date, got {raw:?}: {e}"))
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

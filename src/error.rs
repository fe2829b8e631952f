//! Crate-level error types.
//!
//! [`ChartError`] unifies every error source (configuration, HTTP, JSON,
//! keychain, persisted state) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator for easy
//! propagation. Geometric degeneracy in the viewport engine is never an
//! error; the engine clamps instead.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A configuration value was missing or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request for bars failed (connect, timeout, or status).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The market-data API answered with an explicit error payload.
    #[error("api error: {0}")]
    Api(String),

    /// Terminal or filesystem I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A persisted viewport snapshot could not be used.
    #[error("state error: {0}")]
    State(String),
}

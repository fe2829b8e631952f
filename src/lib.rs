//! Terminal candlestick chart.
//!
//! Fetches OHLC bars from an aggregates REST endpoint and renders them in
//! the terminal with keyboard zoom and pan. The interactive math lives in
//! [`viewport`], a pure engine that turns zoom/pan ticks into a clamped
//! window over the bars and that window into drawing coordinates.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod screen;
pub mod tui;
pub mod viewport;

pub use error::{ChartError, Result};

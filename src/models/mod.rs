//! Wire models for the aggregates endpoint.
//!
//! Contains the [`Bar`] price record, the response envelope it arrives in,
//! and the [`Timeframe`] granularities the endpoint is queried with.

pub mod bar;
pub mod timeframe;

pub use bar::{Bar, BarsResponse};
pub use timeframe::Timeframe;

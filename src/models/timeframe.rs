//! Bar granularities supported by the chart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bucket granularity of the bars being displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M5,
    M15,
    M30,
    #[default]
    H1,
}

impl Timeframe {
    /// All timeframes in selector order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
    ];

    /// Returns the `{multiplier}/{timespan}` path segment for the API.
    pub fn as_path(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5/minute",
            Timeframe::M15 => "15/minute",
            Timeframe::M30 => "30/minute",
            Timeframe::H1 => "1/hour",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
        }
    }

    /// Returns the selector position (0-based).
    pub fn index(&self) -> usize {
        match self {
            Timeframe::M5 => 0,
            Timeframe::M15 => 1,
            Timeframe::M30 => 2,
            Timeframe::H1 => 3,
        }
    }

    /// Looks up a timeframe by selector position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Cycles to the next timeframe, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

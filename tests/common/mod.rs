//! Shared test utilities.

#![allow(dead_code)]

use candleterm::models::Bar;

/// 2023-01-09T00:00:00Z in epoch milliseconds.
pub const JAN_9_2023: i64 = 1_673_222_400_000;

pub const MINUTE: i64 = 60_000;
pub const HOUR: i64 = 60 * MINUTE;

/// `n` newest-first bars spaced `step_ms` apart, newest at `newest_ms`.
/// Prices drift upward with age so every window has distinct extremes.
pub fn bars(n: usize, newest_ms: i64, step_ms: i64) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let base = 100.0 + i as f64;
            Bar {
                open: base,
                close: base + 0.5,
                low: base - 1.0,
                high: base + 1.5,
                time: newest_ms - i as i64 * step_ms,
            }
        })
        .collect()
}

/// Bar with the given low/high, everything else in between.
pub fn bar(low: f64, high: f64) -> Bar {
    Bar {
        open: low,
        close: high,
        low,
        high,
        time: JAN_9_2023,
    }
}

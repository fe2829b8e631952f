//! Time-axis delimiters: where to break the chart vertically and what to
//! print there.

use chrono::{Datelike, FixedOffset, Timelike};

use crate::models::{Bar, Timeframe};

/// Decides whether a vertical delimiter belongs at `bar`.
///
/// `next_bar` is the bar just older than `bar` (index + 1 in the
/// newest-first sequence), or `None` for the oldest bar.
///
/// - 5m: top of every hour.
/// - 15m: top of every even hour.
/// - 30m and 1h: first bar of a new calendar day.
pub fn should_draw_time_delimiter(
    bar: &Bar,
    next_bar: Option<&Bar>,
    timeframe: Timeframe,
    offset: FixedOffset,
) -> bool {
    let Some(time) = bar.datetime(offset) else {
        return false;
    };

    match timeframe {
        Timeframe::M5 => time.minute() == 0,
        Timeframe::M15 => time.minute() == 0 && time.hour() % 2 == 0,
        Timeframe::M30 | Timeframe::H1 => next_bar
            .and_then(|next| next.datetime(offset))
            .is_some_and(|next| next.date_naive() != time.date_naive()),
    }
}

/// Label printed next to a delimiter: `HH:00` for intraday timeframes,
/// `<day> <Mon>` for the day-bucketed ones.
pub fn delimiter_label(bar: &Bar, timeframe: Timeframe, offset: FixedOffset) -> String {
    let Some(time) = bar.datetime(offset) else {
        return String::new();
    };

    match timeframe {
        Timeframe::M5 | Timeframe::M15 => format!("{:02}:00", time.hour()),
        Timeframe::M30 | Timeframe::H1 => format!("{} {}", time.day(), time.format("%b")),
    }
}

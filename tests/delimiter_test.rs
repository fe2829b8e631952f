//! Time-axis delimiter placement and labels.

mod common;

use chrono::FixedOffset;

use candleterm::models::{Bar, Timeframe};
use candleterm::viewport::{delimiter_label, should_draw_time_delimiter};

use common::{HOUR, JAN_9_2023, MINUTE, bars};

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn at(time: i64) -> Bar {
    Bar {
        open: 1.0,
        close: 1.0,
        low: 1.0,
        high: 1.0,
        time,
    }
}

#[test]
fn day_break_on_thirty_minute_chart() {
    let first_of_day = at(JAN_9_2023);
    let previous = at(JAN_9_2023 - 30 * MINUTE);

    assert!(should_draw_time_delimiter(
        &first_of_day,
        Some(&previous),
        Timeframe::M30,
        utc()
    ));
    assert_eq!(delimiter_label(&first_of_day, Timeframe::M30, utc()), "9 Jan");
}

#[test]
fn same_day_bars_do_not_break() {
    let bar = at(JAN_9_2023 + HOUR);
    let previous = at(JAN_9_2023);
    assert!(!should_draw_time_delimiter(
        &bar,
        Some(&previous),
        Timeframe::H1,
        utc()
    ));
}

#[test]
fn five_minute_chart_breaks_every_hour() {
    // 24h of 5m bars, newest first.
    let series = bars(24 * 12, JAN_9_2023 + 24 * HOUR - 5 * MINUTE, 5 * MINUTE);
    let breaks: Vec<&Bar> = series
        .iter()
        .enumerate()
        .filter(|(i, bar)| {
            should_draw_time_delimiter(bar, series.get(i + 1), Timeframe::M5, utc())
        })
        .map(|(_, bar)| bar)
        .collect();

    assert_eq!(breaks.len(), 24);
    assert_eq!(delimiter_label(breaks[0], Timeframe::M5, utc()), "23:00");
}

#[test]
fn fifteen_minute_chart_breaks_every_other_hour() {
    let series = bars(24 * 4, JAN_9_2023 + 24 * HOUR - 15 * MINUTE, 15 * MINUTE);
    let labels: Vec<String> = series
        .iter()
        .enumerate()
        .filter(|(i, bar)| {
            should_draw_time_delimiter(bar, series.get(i + 1), Timeframe::M15, utc())
        })
        .map(|(_, bar)| delimiter_label(bar, Timeframe::M15, utc()))
        .collect();

    assert_eq!(labels.len(), 12);
    assert_eq!(labels.first().map(String::as_str), Some("22:00"));
    assert_eq!(labels.last().map(String::as_str), Some("00:00"));
}

#[test]
fn offset_shifts_the_day_boundary() {
    // 23:00 UTC on Jan 8 is already Jan 9 at UTC+2.
    let bar = at(JAN_9_2023 - HOUR);
    let previous = at(JAN_9_2023 - 2 * HOUR);
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    assert!(!should_draw_time_delimiter(
        &bar,
        Some(&previous),
        Timeframe::H1,
        utc()
    ));
    // Local times 01:00 and 00:00 on the same day.
    assert!(!should_draw_time_delimiter(
        &bar,
        Some(&previous),
        Timeframe::H1,
        plus_two
    ));

    let before_midnight = at(JAN_9_2023 - 3 * HOUR);
    assert!(should_draw_time_delimiter(
        &previous,
        Some(&before_midnight),
        Timeframe::H1,
        plus_two
    ));
    assert_eq!(delimiter_label(&previous, Timeframe::H1, plus_two), "9 Jan");
}

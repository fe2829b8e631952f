//! Behavioural tests for the viewport engine: gesture clamping, windowing
//! and coordinate transforms.

mod common;

use quickcheck_macros::quickcheck;

use candleterm::viewport::{
    VISIBLE_BARS_MIN, ViewportState, bar_x, derive_geometry, price_to_y,
};

use common::{HOUR, JAN_9_2023, bar, bars};

/// Maps arbitrary input onto a valid zoom factor in `[0.1, 10]`.
fn zoom(raw: f64) -> f64 {
    if raw.is_finite() { 0.1 + raw.abs() % 9.9 } else { 1.0 }
}

/// Maps arbitrary input onto a pan delta in `[-5000, 5000]` px.
fn pan(raw: f64) -> f64 {
    if raw.is_finite() { raw % 5000.0 } else { 0.0 }
}

/// 200 bars, 100 visible, 1000px wide: 10px per bar.
fn scenario_state() -> ViewportState {
    ViewportState::new(200).on_resize(1000.0, 400.0)
}

#[quickcheck]
fn visible_count_stays_in_bounds(len: u16, ticks: Vec<(f64, f64)>) -> bool {
    let len = usize::from(len % 1000) + VISIBLE_BARS_MIN;
    let mut state = ViewportState::new(len).on_resize(1200.0, 600.0);
    ticks.into_iter().all(|(z, p)| {
        state = state.apply_gesture(zoom(z), pan(p));
        (VISIBLE_BARS_MIN..=len).contains(&state.visible_bars_count())
    })
}

#[quickcheck]
fn scroll_stays_within_previous_bound(len: u16, ticks: Vec<(f64, f64)>) -> bool {
    let len = usize::from(len % 1000) + VISIBLE_BARS_MIN;
    let mut state = ViewportState::new(len).on_resize(900.0, 300.0);
    ticks.into_iter().all(|(z, p)| {
        let bound = state.max_scroll();
        state = state.apply_gesture(zoom(z), pan(p));
        state.scrolled_by() >= 0.0 && state.scrolled_by() <= bound
    })
}

#[quickcheck]
fn window_never_empty(len: u16, width: u16, ticks: Vec<(f64, f64)>) -> bool {
    let len = usize::from(len % 500) + VISIBLE_BARS_MIN;
    let data = bars(len, JAN_9_2023, HOUR);
    let mut state = ViewportState::new(len).on_resize(f64::from(width), 200.0);
    ticks.into_iter().all(|(z, p)| {
        state = state.apply_gesture(zoom(z), pan(p));
        derive_geometry(&state, &data).is_some_and(|g| {
            let visible = g.visible_bars(&data);
            !visible.is_empty() && g.px_per_point.is_finite()
        })
    })
}

#[test]
fn identity_gesture_changes_nothing() {
    let state = scenario_state().apply_gesture(1.3, 420.0);
    let next = state.apply_gesture(1.0, 0.0);
    assert_eq!(next.visible_bars_count(), state.visible_bars_count());
    assert_eq!(next.scrolled_by(), state.scrolled_by());
}

#[test]
fn minimum_sized_sequence_cannot_zoom_or_scroll() {
    let state = ViewportState::new(VISIBLE_BARS_MIN).on_resize(800.0, 400.0);
    for zoom in [1.01, 2.0, 50.0] {
        let next = state.apply_gesture(zoom, 300.0);
        assert_eq!(next.visible_bars_count(), VISIBLE_BARS_MIN);
        assert_eq!(next.scrolled_by(), 0.0);
    }
}

#[test]
fn zoom_in_by_two_halves_window() {
    let state = scenario_state();
    assert_eq!(state.visible_bars_count(), 100);
    assert_eq!(state.bar_width(), 10.0);

    let next = state.apply_gesture(2.0, 0.0);
    assert_eq!(next.visible_bars_count(), 50);
}

#[test]
fn overscroll_clamps_to_hidden_width() {
    let next = scenario_state().apply_gesture(1.0, 2000.0);
    assert_eq!(next.scrolled_by(), (200.0 - 100.0) * 10.0);
}

#[test]
fn visible_extremes_over_window() {
    let data = vec![bar(10.0, 15.0), bar(12.0, 14.0), bar(8.0, 20.0)];
    let state = ViewportState::new(data.len()).on_resize(300.0, 240.0);
    let geometry = derive_geometry(&state, &data).unwrap();
    assert_eq!(geometry.visible_min, 8.0);
    assert_eq!(geometry.visible_max, 20.0);
    assert_eq!(geometry.px_per_point, 20.0);
}

#[test]
fn extremes_follow_pan() {
    let data = bars(200, JAN_9_2023, HOUR);
    let state = scenario_state();
    let at_latest = derive_geometry(&state, &data).unwrap();

    let panned = state.apply_gesture(1.0, 1000.0);
    let at_oldest = derive_geometry(&panned, &data).unwrap();

    assert_eq!((at_oldest.start_index, at_oldest.end_index), (100, 200));
    assert!(at_oldest.visible_min > at_latest.visible_min);
    assert!(at_oldest.visible_max > at_latest.visible_max);
}

#[test]
fn transforms_place_extremes_on_edges() {
    let data = bars(150, JAN_9_2023, HOUR);
    let state = ViewportState::new(150).on_resize(1000.0, 400.0);
    let g = derive_geometry(&state, &data).unwrap();

    let top = price_to_y(g.visible_max, g.visible_min, g.px_per_point, 400.0);
    let bottom = price_to_y(g.visible_min, g.visible_min, g.px_per_point, 400.0);
    assert!(top.abs() < 1e-9);
    assert_eq!(bottom, 400.0);

    assert_eq!(bar_x(0, g.bar_width, 1000.0), 1000.0);
    assert_eq!(bar_x(100, g.bar_width, 1000.0), 0.0);
}

#[test]
fn zoom_out_bound_catches_up_next_tick() {
    // Scroll to the far end of a 50-bar window, then zoom out to 100 bars.
    let state = scenario_state()
        .apply_gesture(2.0, 0.0)
        .apply_gesture(1.0, 10_000.0);
    let zoomed_out = state.apply_gesture(0.5, 0.0);
    assert_eq!(zoomed_out.visible_bars_count(), 100);
    // Bound still reflects the 50-bar window for this tick.
    assert!(zoomed_out.scrolled_by() > zoomed_out.max_scroll());

    let settled = zoomed_out.apply_gesture(1.0, 0.0);
    assert_eq!(settled.scrolled_by(), settled.max_scroll());
}

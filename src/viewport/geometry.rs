//! Per-frame geometry derived from a [`ViewportState`] and its bars.

use crate::models::Bar;

use super::ViewportState;

/// Smallest price span used for vertical scaling. A flat window (every
/// high equal to every low) is scaled as if it spanned this much.
pub const MIN_PRICE_RANGE: f64 = 1e-9;

/// Drawing geometry for one frame.
///
/// `start_index..end_index` is the visible window as indices into the full,
/// newest-first bar sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub start_index: usize,
    pub end_index: usize,
    pub visible_min: f64,
    pub visible_max: f64,
    pub px_per_point: f64,
    pub bar_width: f64,
}

impl Geometry {
    /// The visible bars as a slice of the sequence the geometry was derived from.
    pub fn visible_bars<'a>(&self, bars: &'a [Bar]) -> &'a [Bar] {
        &bars[self.start_index.min(bars.len())..self.end_index.min(bars.len())]
    }

    /// Vertical position of `price` on a canvas of `canvas_height`.
    pub fn y(&self, price: f64, canvas_height: f64) -> f64 {
        price_to_y(price, self.visible_min, self.px_per_point, canvas_height)
    }
}

/// Derives the visible window, its price extremes and the scaling factors.
///
/// The window follows the scroll offset: it starts `round(scrolled_by /
/// bar_width)` bars back from the newest bar and is held fully inside the
/// sequence, so it is never empty for a non-empty sequence. Before the first
/// layout (`bar_width` zero or not finite) the full sequence is used.
///
/// Returns `None` only when `bars` is empty.
pub fn derive_geometry(state: &ViewportState, bars: &[Bar]) -> Option<Geometry> {
    if bars.is_empty() {
        return None;
    }

    let bar_width = state.bar_width();
    let count = state.visible_bars_count().min(bars.len());

    let (start_index, end_index) = if bar_width.is_finite() && bar_width > 0.0 && count > 0 {
        let last_start = bars.len() - count;
        let start = (state.scrolled_by() / bar_width).round();
        let start = if start.is_finite() {
            (start.max(0.0) as usize).min(last_start)
        } else {
            0
        };
        (start, (start + count).min(bars.len()))
    } else {
        (0, bars.len())
    };

    let window = &bars[start_index..end_index];
    let visible_min = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let visible_max = window
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);

    let range = (visible_max - visible_min).max(MIN_PRICE_RANGE);
    let px_per_point = if range.is_finite() {
        state.canvas_height() / range
    } else {
        0.0
    };

    Some(Geometry {
        start_index,
        end_index,
        visible_min,
        visible_max,
        px_per_point,
        bar_width,
    })
}

/// Maps a price to a device y coordinate. Higher prices sit closer to the top.
pub fn price_to_y(price: f64, visible_min: f64, px_per_point: f64, canvas_height: f64) -> f64 {
    canvas_height - (price - visible_min) * px_per_point
}

/// Maps a bar's index in the full sequence (0 = newest) to a device x
/// coordinate. The newest bar sits on the right edge; the renderer shifts the
/// whole drawing by `scrolled_by` once per frame.
pub fn bar_x(index: usize, bar_width: f64, canvas_width: f64) -> f64 {
    canvas_width - index as f64 * bar_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(low: f64, high: f64) -> Bar {
        Bar {
            open: low,
            close: high,
            low,
            high,
            time: 0,
        }
    }

    fn flat_bars(n: usize) -> Vec<Bar> {
        (0..n).map(|i| bar(100.0 + i as f64, 110.0 + i as f64)).collect()
    }

    #[test]
    fn extremes_over_window() {
        let bars = vec![bar(10.0, 15.0), bar(12.0, 14.0), bar(8.0, 20.0)];
        let state = ViewportState::new(bars.len()).on_resize(300.0, 120.0);

        let geometry = derive_geometry(&state, &bars).unwrap();
        assert_eq!(geometry.visible_min, 8.0);
        assert_eq!(geometry.visible_max, 20.0);
        assert_eq!(geometry.px_per_point, 10.0);
    }

    #[test]
    fn window_follows_scroll() {
        let bars = flat_bars(200);
        let state = ViewportState::new(200)
            .on_resize(1000.0, 400.0)
            .apply_gesture(1.0, 250.0);

        let geometry = derive_geometry(&state, &bars).unwrap();
        assert_eq!(geometry.bar_width, 10.0);
        assert_eq!((geometry.start_index, geometry.end_index), (25, 125));
        assert_eq!(geometry.visible_min, 125.0);
        assert_eq!(geometry.visible_max, 234.0);
        assert_eq!(geometry.visible_bars(&bars).len(), 100);
    }

    #[test]
    fn falls_back_to_full_sequence_before_layout() {
        let bars = flat_bars(150);
        let geometry = derive_geometry(&ViewportState::new(150), &bars).unwrap();
        assert_eq!((geometry.start_index, geometry.end_index), (0, 150));
    }

    #[test]
    fn window_stays_full_after_shrinking_resize() {
        let bars = flat_bars(200);
        let state = ViewportState::new(200)
            .on_resize(1000.0, 400.0)
            .apply_gesture(1.0, 1000.0)
            .on_resize(500.0, 400.0);
        // 1000px at 5px per bar would start past the end.
        let geometry = derive_geometry(&state, &bars).unwrap();
        assert_eq!((geometry.start_index, geometry.end_index), (100, 200));
    }

    #[test]
    fn flat_window_stays_finite() {
        let bars = vec![bar(50.0, 50.0); 30];
        let state = ViewportState::new(30).on_resize(300.0, 200.0);
        let geometry = derive_geometry(&state, &bars).unwrap();
        assert!(geometry.px_per_point.is_finite());
        assert_eq!(geometry.y(50.0, 200.0), 200.0);
    }

    #[test]
    fn empty_sequence_has_no_geometry() {
        assert!(derive_geometry(&ViewportState::new(0), &[]).is_none());
    }

    #[test]
    fn price_axis_is_inverted() {
        assert_eq!(price_to_y(8.0, 8.0, 10.0, 120.0), 120.0);
        assert_eq!(price_to_y(20.0, 8.0, 10.0, 120.0), 0.0);
    }

    #[test]
    fn newest_bar_on_right_edge() {
        assert_eq!(bar_x(0, 10.0, 1000.0), 1000.0);
        assert_eq!(bar_x(3, 10.0, 1000.0), 970.0);
    }
}

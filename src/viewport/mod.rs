//! Viewport engine for the candlestick chart.
//!
//! [`ViewportState`] is the user-driven window over an immutable, newest-first
//! bar sequence: how many bars fit across the canvas and how far the drawing
//! is panned toward older bars. Every update returns a new value; nothing is
//! mutated in place and no update can leave the state outside its bounds.
//!
//! Geometry for a frame is derived on demand by [`derive_geometry`], and the
//! two pixel transforms [`price_to_y`] and [`bar_x`] turn prices and bar
//! indices into device coordinates (y grows downward).

pub mod delimiter;
pub mod geometry;
pub mod snapshot;

pub use delimiter::{delimiter_label, should_draw_time_delimiter};
pub use geometry::{Geometry, MIN_PRICE_RANGE, bar_x, derive_geometry, price_to_y};
pub use snapshot::{SNAPSHOT_VERSION, ViewportSnapshot};

/// Smallest number of bars the user can zoom in to.
pub const VISIBLE_BARS_MIN: usize = 20;

/// Number of bars shown when a new sequence is loaded.
pub const START_VISIBLE_BARS_COUNT: usize = 100;

/// Windowed view over a bar sequence of `bar_count` bars.
///
/// Invariants, upheld by every constructor and update:
/// - `min(VISIBLE_BARS_MIN, bar_count) <= visible_bars_count <= bar_count`
/// - `0 <= scrolled_by`, and `scrolled_by` never exceeds the scroll bound
///   computed at the last gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    bar_count: usize,
    visible_bars_count: usize,
    scrolled_by: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl ViewportState {
    /// Creates the initial viewport for a freshly loaded sequence.
    pub fn new(bar_count: usize) -> Self {
        Self {
            bar_count,
            visible_bars_count: clamp_count(START_VISIBLE_BARS_COUNT, bar_count),
            scrolled_by: 0.0,
            canvas_width: 0.0,
            canvas_height: 0.0,
        }
    }

    /// Rebuilds a viewport from persisted fields, re-clamping each one
    /// against the sequence that is actually loaded now.
    pub fn restore(snapshot: &ViewportSnapshot, bar_count: usize, width: f64, height: f64) -> Self {
        let base = Self {
            bar_count,
            visible_bars_count: clamp_count(snapshot.visible_bars_count, bar_count),
            scrolled_by: 0.0,
            canvas_width: 0.0,
            canvas_height: 0.0,
        }
        .on_resize(width, height);

        let scrolled_by = sanitize(snapshot.scrolled_by, 0.0).clamp(0.0, base.max_scroll());
        Self { scrolled_by, ..base }
    }

    /// Number of bars in the underlying sequence.
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Number of bars spread across the canvas width.
    pub fn visible_bars_count(&self) -> usize {
        self.visible_bars_count
    }

    /// Horizontal pan offset in pixels, measured from the newest bar.
    pub fn scrolled_by(&self) -> f64 {
        self.scrolled_by
    }

    /// Drawing surface width in pixels.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Drawing surface height in pixels.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Pixel width allotted to one bar. Zero while no bars are visible.
    pub fn bar_width(&self) -> f64 {
        if self.visible_bars_count == 0 {
            return 0.0;
        }
        self.canvas_width / self.visible_bars_count as f64
    }

    /// Largest pan offset allowed at the current zoom.
    pub fn max_scroll(&self) -> f64 {
        let hidden = self.bar_count.saturating_sub(self.visible_bars_count) as f64;
        let bound = hidden * self.bar_width();
        if bound.is_finite() { bound.max(0.0) } else { 0.0 }
    }

    /// Applies one interaction tick.
    ///
    /// `zoom_change > 1` shows fewer bars, `< 1` shows more; `pan_delta_x > 0`
    /// reveals older bars. The scroll bound is taken from the state *before*
    /// the new count takes effect, so after a zoom-out the bound catches up
    /// on the following tick. Non-finite or non-positive zoom and
    /// non-finite pan are treated as no change.
    #[must_use]
    pub fn apply_gesture(self, zoom_change: f64, pan_delta_x: f64) -> Self {
        let zoom_change = if zoom_change.is_finite() && zoom_change > 0.0 {
            zoom_change
        } else {
            1.0
        };
        let pan_delta_x = sanitize(pan_delta_x, 0.0);

        let raw = (self.visible_bars_count as f64 / zoom_change).round();
        // Float-to-int `as` saturates, so huge zoom-outs land on usize::MAX
        // and get clamped below.
        let visible_bars_count = clamp_count(raw as usize, self.bar_count);

        let scrolled_by = (self.scrolled_by + pan_delta_x).clamp(0.0, self.max_scroll());

        Self {
            visible_bars_count,
            scrolled_by,
            ..self
        }
    }

    /// Records a new canvas size. Leaves the window untouched; geometry must
    /// be re-derived afterwards.
    #[must_use]
    pub fn on_resize(self, width: f64, height: f64) -> Self {
        Self {
            canvas_width: sanitize(width, 0.0).max(0.0),
            canvas_height: sanitize(height, 0.0).max(0.0),
            ..self
        }
    }

    /// Returns to the newest bar without changing the zoom.
    #[must_use]
    pub fn scroll_to_latest(self) -> Self {
        Self {
            scrolled_by: 0.0,
            ..self
        }
    }

    /// Captures the fields worth persisting across restarts.
    pub fn snapshot(&self, timeframe: crate::models::Timeframe) -> ViewportSnapshot {
        ViewportSnapshot {
            version: SNAPSHOT_VERSION,
            timeframe,
            visible_bars_count: self.visible_bars_count,
            scrolled_by: self.scrolled_by,
        }
    }
}

/// Clamps a bar count into `[min(VISIBLE_BARS_MIN, bar_count), bar_count]`.
fn clamp_count(count: usize, bar_count: usize) -> usize {
    count.clamp(VISIBLE_BARS_MIN.min(bar_count), bar_count)
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

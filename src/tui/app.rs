//! Application state for the TUI.

use std::time::{Duration, Instant};

use chrono::FixedOffset;

use crate::models::Timeframe;
use crate::screen::Screen;
use crate::viewport::ViewportSnapshot;

/// Multiplicative zoom applied per zoom key press.
pub const ZOOM_STEP: f64 = 1.25;

/// Bars panned per arrow key press.
pub const PAN_STEP_BARS: f64 = 5.0;

/// How long a transient error stays in the status bar.
const ERROR_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    /// Chart screen: loading, content or error, plus the viewport.
    pub screen: Screen,
    /// Symbol shown in the header.
    pub symbol: String,
    /// Offset used for time-axis delimiters.
    pub utc_offset: FixedOffset,
    /// Transient message (clears after a timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App starting on the default timeframe.
    pub fn new(symbol: impl Into<String>, utc_offset: FixedOffset) -> Self {
        Self {
            screen: Screen::new(Timeframe::default()),
            symbol: symbol.into(),
            utc_offset,
            error_message: None,
            should_quit: false,
        }
    }

    /// Creates an App that resumes the window saved in `snapshot`.
    pub fn restored(
        symbol: impl Into<String>,
        utc_offset: FixedOffset,
        snapshot: ViewportSnapshot,
    ) -> Self {
        Self {
            screen: Screen::with_snapshot(snapshot),
            ..Self::new(symbol, utc_offset)
        }
    }

    /// Selected timeframe.
    pub fn timeframe(&self) -> Timeframe {
        self.screen.timeframe()
    }

    /// Zooms in (`steps > 0`) or out (`steps < 0`) around the current window.
    pub fn zoom(&mut self, steps: i32) {
        self.screen.apply_gesture(ZOOM_STEP.powi(steps), 0.0);
    }

    /// Pans by a number of bars; positive reveals older bars.
    pub fn pan_bars(&mut self, bars: f64) {
        let bar_width = self
            .screen
            .viewport()
            .map(|v| v.bar_width())
            .unwrap_or_default();
        self.screen.apply_gesture(1.0, bars * bar_width);
    }

    /// Pans by one full window; positive reveals older bars.
    pub fn pan_pages(&mut self, pages: f64) {
        let visible = self
            .screen
            .viewport()
            .map(|v| v.visible_bars_count())
            .unwrap_or_default();
        self.pan_bars(pages * visible as f64);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than [`ERROR_TTL`].
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_TTL
        {
            self.error_message = None;
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}

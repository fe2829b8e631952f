//! Screen state for the chart and the bar-fetch lifecycle around it.
//!
//! [`Screen`] is the single owner of what the chart shows. Every load is
//! tagged with a generation number; a result whose generation is no longer
//! current (because the user picked another timeframe in the meantime) is
//! dropped instead of overwriting the newer request's state.

use tracing::{debug, info, warn};

use crate::Result;
use crate::models::{Bar, Timeframe};
use crate::viewport::{Geometry, ViewportSnapshot, ViewportState, derive_geometry};

/// What the chart area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    /// A fetch is outstanding.
    Loading { timeframe: Timeframe },
    /// Bars are loaded and the user can zoom and pan.
    Content {
        bars: Vec<Bar>,
        timeframe: Timeframe,
        viewport: ViewportState,
    },
    /// The last fetch failed.
    Error { timeframe: Timeframe, message: String },
}

impl ScreenState {
    /// Timeframe the state belongs to.
    pub fn timeframe(&self) -> Timeframe {
        match self {
            ScreenState::Loading { timeframe }
            | ScreenState::Content { timeframe, .. }
            | ScreenState::Error { timeframe, .. } => *timeframe,
        }
    }
}

/// Identifies one bar request. Returned by [`Screen::begin_load`] and handed
/// back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub timeframe: Timeframe,
}

/// Chart screen controller.
#[derive(Debug)]
pub struct Screen {
    state: ScreenState,
    generation: u64,
    canvas: (f64, f64),
    /// Window to re-apply on the first successful load of its timeframe.
    pending_restore: Option<ViewportSnapshot>,
}

impl Screen {
    /// Creates a screen waiting for its first load of `timeframe`.
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            state: ScreenState::Loading { timeframe },
            generation: 0,
            canvas: (0.0, 0.0),
            pending_restore: None,
        }
    }

    /// Creates a screen that restores `snapshot` once its timeframe loads.
    pub fn with_snapshot(snapshot: ViewportSnapshot) -> Self {
        let timeframe = snapshot.timeframe;
        Self {
            pending_restore: Some(snapshot),
            ..Self::new(timeframe)
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn timeframe(&self) -> Timeframe {
        self.state.timeframe()
    }

    /// Current request generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new load, superseding any request still in flight.
    pub fn begin_load(&mut self, timeframe: Timeframe) -> LoadTicket {
        self.generation += 1;
        self.state = ScreenState::Loading { timeframe };
        debug!(generation = self.generation, timeframe = %timeframe, "loading bars");
        LoadTicket {
            generation: self.generation,
            timeframe,
        }
    }

    /// Applies a finished load. Returns `false` if the ticket is stale and
    /// the result was discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Bar>>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded bar load"
            );
            return false;
        }

        self.state = match result {
            Ok(bars) => {
                let (width, height) = self.canvas;
                let viewport = match self.pending_restore.take() {
                    Some(snapshot) if snapshot.timeframe == ticket.timeframe => {
                        ViewportState::restore(&snapshot, bars.len(), width, height)
                    }
                    _ => ViewportState::new(bars.len()).on_resize(width, height),
                };
                info!(
                    timeframe = %ticket.timeframe,
                    bars = bars.len(),
                    visible = viewport.visible_bars_count(),
                    "chart content ready"
                );
                ScreenState::Content {
                    bars,
                    timeframe: ticket.timeframe,
                    viewport,
                }
            }
            Err(e) => {
                warn!(timeframe = %ticket.timeframe, error = %e, "bar load failed");
                ScreenState::Error {
                    timeframe: ticket.timeframe,
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Feeds one zoom/pan tick into the viewport. Ignored unless content is
    /// shown.
    pub fn apply_gesture(&mut self, zoom_change: f64, pan_delta_x: f64) {
        if let ScreenState::Content { viewport, .. } = &mut self.state {
            *viewport = viewport.apply_gesture(zoom_change, pan_delta_x);
        }
    }

    /// Jumps back to the newest bar.
    pub fn scroll_to_latest(&mut self) {
        if let ScreenState::Content { viewport, .. } = &mut self.state {
            *viewport = viewport.scroll_to_latest();
        }
    }

    /// Records the drawing surface size, in any state.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas = (width, height);
        if let ScreenState::Content { viewport, .. } = &mut self.state {
            *viewport = viewport.on_resize(width, height);
        }
    }

    /// Viewport of the loaded content, if any.
    pub fn viewport(&self) -> Option<&ViewportState> {
        match &self.state {
            ScreenState::Content { viewport, .. } => Some(viewport),
            _ => None,
        }
    }

    /// Frame geometry for the loaded content, if any.
    pub fn geometry(&self) -> Option<Geometry> {
        match &self.state {
            ScreenState::Content { bars, viewport, .. } => derive_geometry(viewport, bars),
            _ => None,
        }
    }

    /// Snapshot of the current window for persistence.
    pub fn snapshot(&self) -> Option<ViewportSnapshot> {
        match &self.state {
            ScreenState::Content {
                timeframe,
                viewport,
                ..
            } => Some(viewport.snapshot(*timeframe)),
            _ => None,
        }
    }
}

//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::app::App;
use super::components::{chart, keybindings, status_bar, timeframe_bar};

/// Canvas units per terminal cell with the braille marker.
pub const DOTS_PER_COLUMN: f64 = 2.0;
pub const DOTS_PER_ROW: f64 = 4.0;

/// Splits the terminal into timeframe bar, status bar, chart and help line.
pub fn layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1), // Timeframe selector
        Constraint::Length(1), // Status bar
        Constraint::Min(3),    // Chart
        Constraint::Length(1), // Keybindings help
    ])
    .areas(area)
}

/// Size of the chart's drawing surface, in canvas units, for a terminal of
/// `columns` x `rows` cells.
pub fn chart_canvas_size(columns: u16, rows: u16) -> (f64, f64) {
    let [_, _, chart_area, _] = layout(Rect::new(0, 0, columns, rows));
    let inner = chart::inner(chart_area);
    (
        f64::from(inner.width) * DOTS_PER_COLUMN,
        f64::from(inner.height) * DOTS_PER_ROW,
    )
}

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let [selector, status, chart_area, help] = layout(frame.area());

    timeframe_bar::render(frame, selector, app);
    status_bar::render(frame, status, app);
    chart::render(frame, chart_area, app);
    keybindings::render(frame, help);
}

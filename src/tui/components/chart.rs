//! Candlestick chart drawn on a braille canvas.
//!
//! All coordinates come from the viewport engine in device space (x grows
//! right, y grows down, origin top-left). Two adaptations happen here, once
//! per frame: the canvas x-bounds are shifted by the scroll offset so the
//! whole drawing translates together, and device y is flipped into the
//! canvas' bottom-up axis.
//!
//! The offset is capped at the viewport's current scroll bound. Until the
//! next gesture settles it, `scrolled_by` can sit past that bound (after a
//! zoom-out or a shrinking resize), while the derived window is already held
//! at the oldest bars; the cap keeps the translate on that window.

use chrono::FixedOffset;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};
use unicode_width::UnicodeWidthStr;

use crate::models::{Bar, Timeframe};
use crate::screen::ScreenState;
use crate::tui::app::App;
use crate::viewport::{
    Geometry, ViewportState, bar_x, delimiter_label, derive_geometry, should_draw_time_delimiter,
};

/// Length of one dash and one gap in canvas units.
const DASH: f64 = 4.0;

/// Chart border block.
fn block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Drawing area inside the chart border.
pub fn inner(area: Rect) -> Rect {
    block(String::new()).inner(area)
}

/// Renders the chart for the current screen state.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" {} [{}] ", app.symbol, app.timeframe().label());

    match app.screen.state() {
        ScreenState::Loading { timeframe } => {
            let para = Paragraph::new(format!("Loading {timeframe} bars..."))
                .style(Style::default().fg(Color::DarkGray))
                .block(block(title));
            frame.render_widget(para, area);
        }
        ScreenState::Error { message, .. } => {
            let para = Paragraph::new(vec![
                Line::from(message.clone().red()),
                Line::from("press [r] to retry".dark_gray()),
            ])
            .block(block(title));
            frame.render_widget(para, area);
        }
        ScreenState::Content {
            bars,
            timeframe,
            viewport,
        } => {
            let inner_width = inner(area).width;
            match derive_geometry(viewport, bars) {
                Some(geometry)
                    if viewport.canvas_width() > 0.0 && viewport.canvas_height() > 0.0 =>
                {
                    let scene = Scene {
                        bars,
                        geometry,
                        viewport: *viewport,
                        timeframe: *timeframe,
                        utc_offset: app.utc_offset,
                        units_per_cell: viewport.canvas_width() / f64::from(inner_width.max(1)),
                    };
                    let (left, right) = scene.screen_x_range();
                    let canvas = Canvas::default()
                        .block(block(title))
                        .marker(Marker::Braille)
                        .x_bounds([left, right])
                        .y_bounds([0.0, viewport.canvas_height()])
                        .paint(|ctx| scene.paint(ctx));
                    frame.render_widget(canvas, area);
                }
                _ => {
                    let para = Paragraph::new("No bars to display")
                        .style(Style::default().fg(Color::DarkGray))
                        .block(block(title));
                    frame.render_widget(para, area);
                }
            }
        }
    }
}

/// Everything needed to paint one frame.
struct Scene<'a> {
    bars: &'a [Bar],
    geometry: Geometry,
    viewport: ViewportState,
    timeframe: Timeframe,
    utc_offset: FixedOffset,
    units_per_cell: f64,
}

impl Scene<'_> {
    fn width(&self) -> f64 {
        self.viewport.canvas_width()
    }

    fn height(&self) -> f64 {
        self.viewport.canvas_height()
    }

    /// Canvas y (bottom-up) for a price.
    fn y(&self, price: f64) -> f64 {
        self.height() - self.geometry.y(price, self.height())
    }

    /// Scroll translation for this frame.
    fn offset(&self) -> f64 {
        self.viewport.scrolled_by().min(self.viewport.max_scroll())
    }

    /// Canvas x-bounds: the device range shifted by the scroll offset.
    fn screen_x_range(&self) -> (f64, f64) {
        let s = self.offset();
        (-s, self.width() - s)
    }

    /// Centre of the bar's slot. `bar_x` is the slot's right edge.
    fn center_x(&self, index: usize) -> f64 {
        let bar_width = self.geometry.bar_width;
        bar_x(index, bar_width, self.width()) - bar_width / 2.0
    }

    fn paint(&self, ctx: &mut Context) {
        self.paint_delimiters(ctx);
        ctx.layer();
        self.paint_bars(ctx);
        ctx.layer();
        self.paint_prices(ctx);
    }

    fn paint_bars(&self, ctx: &mut Context) {
        let bar_width = self.geometry.bar_width;
        let half_body = bar_width / 4.0;

        for (offset, bar) in self.geometry.visible_bars(self.bars).iter().enumerate() {
            let x = self.center_x(self.geometry.start_index + offset);
            let (low, high) = (self.y(bar.low), self.y(bar.high));

            ctx.draw(&CanvasLine::new(x, low, x, high, Color::White));

            let color = if bar.is_bullish() {
                Color::Green
            } else {
                Color::Red
            };
            let mut dx = -half_body;
            loop {
                ctx.draw(&CanvasLine::new(x + dx, low, x + dx, high, color));
                dx += 1.0;
                if dx > half_body {
                    break;
                }
            }
        }
    }

    fn paint_delimiters(&self, ctx: &mut Context) {
        for index in self.geometry.start_index..self.geometry.end_index {
            let bar = &self.bars[index];
            let next = self.bars.get(index + 1);
            if !should_draw_time_delimiter(bar, next, self.timeframe, self.utc_offset) {
                continue;
            }
            let x = self.center_x(index);
            dashed(ctx, (x, 0.0), (x, self.height()), Color::DarkGray);
            let label = delimiter_label(bar, self.timeframe, self.utc_offset);
            ctx.print(x, 0.0, label.dark_gray());
        }
    }

    fn paint_prices(&self, ctx: &mut Context) {
        let Some(newest) = self.bars.first() else {
            return;
        };
        let (left, right) = self.screen_x_range();
        let levels = [
            (self.geometry.visible_max, self.height()),
            (newest.close, self.y(newest.close)),
            (self.geometry.visible_min, 0.0),
        ];

        for (price, y) in levels {
            dashed(ctx, (left, y), (right, y), Color::White);
            let label = format!("{price:.2}");
            let label_width = label.width() as f64 * self.units_per_cell;
            ctx.print(right - label_width, y, label.white());
        }
    }
}

/// Draws a dashed straight line from `from` to `to`.
fn dashed(ctx: &mut Context, from: (f64, f64), to: (f64, f64), color: Color) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if !length.is_finite() || length <= 0.0 {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut start = 0.0;
    while start < length {
        let end = (start + DASH).min(length);
        ctx.draw(&CanvasLine::new(
            from.0 + ux * start,
            from.1 + uy * start,
            from.0 + ux * end,
            from.1 + uy * end,
            color,
        ));
        start += 2.0 * DASH;
    }
}

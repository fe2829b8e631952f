//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::screen::ScreenState;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (label, color) = match app.screen.state() {
        ScreenState::Loading { .. } => ("Loading...".to_string(), Color::Yellow),
        ScreenState::Content { bars, .. } => (format!("{} bars", bars.len()), Color::Green),
        ScreenState::Error { .. } => ("Error".to_string(), Color::Red),
    };

    let window_span = match (app.screen.viewport(), app.screen.geometry()) {
        (Some(viewport), Some(geometry)) => Span::raw(format!(
            " showing {}-{} ({} visible) ",
            geometry.start_index + 1,
            geometry.end_index,
            viewport.visible_bars_count()
        )),
        _ => Span::raw(""),
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(format!(" {label} "), Style::default().fg(color)),
        Span::raw("│"),
        window_span,
        Span::raw("│"),
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

//! Timeframe selector bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Timeframe;
use crate::tui::app::App;

/// Renders the timeframe selector, highlighting the active timeframe.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::styled(
        format!(" {} ", app.symbol),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for tf in Timeframe::ALL {
        let is_active = tf == app.timeframe();

        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} {} ", tf.index() + 1, tf.label()),
            style,
        ));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    frame.render_widget(para, area);
}

//! Keybindings help line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

const HELP: &str =
    "[+/-]zoom [h/l]pan [H/L]page [Home]latest [1-4]timeframe [Tab]next [r]reload [q]quit";

/// Renders the keybindings help line.
pub fn render(frame: &mut Frame, area: Rect) {
    let para = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

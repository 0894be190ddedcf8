use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Goto prompt shown in place of the status bar
pub struct PromptWidget;

impl PromptWidget {
    pub fn render(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
        let base = Style::default().bg(theme.bg2);
        let line = Line::from(vec![
            Span::styled(" goto /", base.fg(theme.accent)),
            Span::styled(text.to_string(), base.fg(theme.fg0)),
        ]);
        frame.render_widget(Paragraph::new(line).style(base), area);

        let x = area.x + (" goto /".len() + text.width()) as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
    }
}

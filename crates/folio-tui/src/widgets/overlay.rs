use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Transition veil drawn over the document while a page jump is in flight
pub struct OverlayWidget;

impl OverlayWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if !app.overlay_visible() || area.height == 0 {
            return;
        }

        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let label_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        let label = Paragraph::new(Line::styled(
            "· · ·",
            Style::default().fg(app.theme.accent),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(label, label_area);
    }
}

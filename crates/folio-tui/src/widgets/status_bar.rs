use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().bg(theme.bg2);

        let (mode_str, mode_style) = if app.controller.is_paging() {
            ("PAGING", base.fg(theme.warning).add_modifier(Modifier::BOLD))
        } else if !app.controller.is_attached() {
            ("NATIVE", base.fg(theme.grey1).add_modifier(Modifier::BOLD))
        } else {
            ("PAGED", base.fg(theme.info).add_modifier(Modifier::BOLD))
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => {
                let index = app.active_index();
                let title = app
                    .sections
                    .get(index)
                    .map(|s| s.title.as_str())
                    .unwrap_or_default();
                let mut text = format!(" {}/{} {}", index + 1, app.sections.len(), title);
                if let Some(reason) = app.last_outcome.and_then(|o| o.pass_reason()) {
                    text.push_str(&format!(" | {}", reason));
                }
                text
            }
        };

        let help_hint = " q:quit /:goto 1-9:jump m:mail ";
        let used = mode_str.len() + 2 + status_text.chars().count() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", mode_str), mode_style),
            Span::styled(status_text, base.fg(theme.fg0)),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, base.fg(theme.grey1)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
